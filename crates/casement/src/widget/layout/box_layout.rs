//! Box layout that arranges items in a horizontal row or vertical column.
//!
//! [`BoxLayout`] is the workhorse layout of the chrome system: the window
//! root stacks the title bar above the content area with a vertical box,
//! and dialogs stack their content widgets the same way.
//!
//! Items are placed along the main axis in insertion order. Available space
//! beyond the summed preferred sizes is handed to items whose size policy
//! lets them grow, with [`SizePolicy::wants_to_grow`] items taking priority
//! so that a single expanding widget (or stretch spacer) absorbs the slack.
//!
//! Item geometries are produced in the same coordinate space as the
//! layout's own geometry. A layout that manages a widget's children must
//! therefore be given its geometry in that widget's local space.
//!
//! # Example
//!
//! ```ignore
//! use casement::widget::layout::{Alignment, BoxLayout};
//!
//! let mut layout = BoxLayout::vertical();
//! layout.add_widget(title_bar_id);
//! layout.add_widget(content_id);
//! layout.set_geometry(window_rect);
//! layout.activate(&mut store);
//! ```

use casement_core::ObjectId;

use crate::geometry::{Rect, Size};
use crate::widget::dispatcher::WidgetAccess;
use crate::widget::geometry::{SizeHint, SizePolicy, SizePolicyPair};

use super::item::{LayoutItem, SpacerItem};
use super::{ContentMargins, DEFAULT_MARGINS, DEFAULT_SPACING};

/// Direction in which a box layout arranges its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Items are arranged left to right.
    #[default]
    Horizontal,
    /// Items are arranged top to bottom.
    Vertical,
}

impl Orientation {
    /// Get the perpendicular orientation.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Cross-axis alignment of items within the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Align items to the start (left/top) of the cross axis.
    Start,
    /// Center items on the cross axis.
    Center,
    /// Align items to the end (right/bottom) of the cross axis.
    End,
    /// Stretch items to fill the cross axis (subject to their size policy
    /// and maximum size).
    #[default]
    Stretch,
}

/// A layout that arranges items in a single row or column.
///
/// The layout does not own widgets. Widget items are referenced by
/// [`ObjectId`] and resolved through a [`WidgetAccess`] storage when the
/// layout is calculated and applied.
#[derive(Debug)]
pub struct BoxLayout {
    orientation: Orientation,
    alignment: Alignment,
    items: Vec<LayoutItem>,
    /// Calculated geometry per item, parallel to `items`.
    item_geometries: Vec<Rect>,
    geometry: Rect,
    margins: ContentMargins,
    spacing: f32,
    dirty: bool,
    cached_size_hint: Option<SizeHint>,
}

impl BoxLayout {
    /// Create a new box layout with the given orientation.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            alignment: Alignment::default(),
            items: Vec::new(),
            item_geometries: Vec::new(),
            geometry: Rect::ZERO,
            margins: DEFAULT_MARGINS,
            spacing: DEFAULT_SPACING,
            dirty: true,
            cached_size_hint: None,
        }
    }

    /// Create a horizontal box layout (items left to right).
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a vertical box layout (items top to bottom).
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Get the layout orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set the layout orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            self.orientation = orientation;
            self.invalidate();
        }
    }

    /// Get the cross-axis alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Set the cross-axis alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        if self.alignment != alignment {
            self.alignment = alignment;
            self.invalidate();
        }
    }

    /// Get the spacing between adjacent items.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Set the spacing between adjacent items.
    pub fn set_spacing(&mut self, spacing: f32) {
        if self.spacing != spacing {
            self.spacing = spacing;
            self.invalidate();
        }
    }

    /// Get the content margins.
    pub fn content_margins(&self) -> ContentMargins {
        self.margins
    }

    /// Set the content margins.
    pub fn set_content_margins(&mut self, margins: ContentMargins) {
        if self.margins != margins {
            self.margins = margins;
            self.invalidate();
        }
    }

    /// Get the layout's geometry.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the layout's geometry.
    ///
    /// This is the full rectangle available to the layout; items are placed
    /// inside it after content margins are applied.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.dirty = true;
        }
    }

    /// Get the geometry available for items after margins are applied.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.geometry.left() + self.margins.left,
            self.geometry.top() + self.margins.top,
            (self.geometry.width() - self.margins.horizontal()).max(0.0),
            (self.geometry.height() - self.margins.vertical()).max(0.0),
        )
    }

    // =========================================================================
    // Item Management
    // =========================================================================

    /// Append an item to the layout.
    pub fn add_item(&mut self, item: LayoutItem) {
        self.items.push(item);
        self.invalidate();
    }

    /// Append a widget to the layout.
    pub fn add_widget(&mut self, widget_id: ObjectId) {
        self.add_item(LayoutItem::widget(widget_id));
    }

    /// Append an expanding spacer that absorbs extra space.
    pub fn add_stretch(&mut self) {
        self.add_item(LayoutItem::stretch());
    }

    /// Append a fixed amount of empty space along the main axis.
    pub fn add_spacing(&mut self, size: f32) {
        let spacer = match self.orientation {
            Orientation::Horizontal => SpacerItem::horizontal_fixed(size),
            Orientation::Vertical => SpacerItem::vertical_fixed(size),
        };
        self.add_item(LayoutItem::Spacer(spacer));
    }

    /// Insert an item at the given index.
    ///
    /// Indices greater than the item count append at the end.
    pub fn insert_item(&mut self, index: usize, item: LayoutItem) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.invalidate();
    }

    /// Insert a widget at the given index.
    pub fn insert_widget(&mut self, index: usize, widget_id: ObjectId) {
        self.insert_item(index, LayoutItem::widget(widget_id));
    }

    /// Insert an expanding spacer at the given index.
    pub fn insert_stretch(&mut self, index: usize) {
        self.insert_item(index, LayoutItem::stretch());
    }

    /// Remove and return the item at the given index.
    pub fn remove_item(&mut self, index: usize) -> Option<LayoutItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.invalidate();
        Some(item)
    }

    /// Remove the first item referencing the given widget.
    ///
    /// Returns `true` if the widget was found and removed.
    pub fn remove_widget(&mut self, widget_id: ObjectId) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.widget_id() == Some(widget_id))
        else {
            return false;
        };
        self.items.remove(index);
        self.invalidate();
        true
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.item_geometries.clear();
        self.invalidate();
    }

    /// Get the number of items in the layout.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the layout has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the item at the given index.
    pub fn item_at(&self, index: usize) -> Option<&LayoutItem> {
        self.items.get(index)
    }

    /// Get all items in layout order.
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Get the calculated geometry of the item at the given index.
    ///
    /// Only meaningful after [`calculate`](Self::calculate) has run; hidden
    /// items report `Rect::ZERO`.
    pub fn item_geometry(&self, index: usize) -> Option<Rect> {
        self.item_geometries.get(index).copied()
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Mark the layout as needing recalculation.
    pub fn invalidate(&mut self) {
        self.dirty = true;
        self.cached_size_hint = None;
    }

    /// Check if the layout needs to be recalculated.
    pub fn needs_recalculation(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Size Hints
    // =========================================================================

    /// Get the layout's combined size hint.
    ///
    /// The main axis sums the preferred sizes of visible items plus spacing;
    /// the cross axis takes the largest. Margins are included. The result is
    /// cached until the layout is invalidated.
    pub fn size_hint<S: WidgetAccess>(&mut self, storage: &S) -> SizeHint {
        if let Some(hint) = self.cached_size_hint {
            return hint;
        }
        let hint = self.calculate_size_hint(storage);
        self.cached_size_hint = Some(hint);
        hint
    }

    /// Get the smallest size the layout can usefully occupy.
    pub fn minimum_size<S: WidgetAccess>(&mut self, storage: &S) -> Size {
        self.size_hint(storage).effective_minimum()
    }

    fn calculate_size_hint<S: WidgetAccess>(&self, storage: &S) -> SizeHint {
        let mut preferred_main = 0.0_f32;
        let mut preferred_cross = 0.0_f32;
        let mut minimum_main = 0.0_f32;
        let mut minimum_cross = 0.0_f32;
        let mut visible_count = 0_usize;

        for item in &self.items {
            if !Self::is_item_visible(item, storage) {
                continue;
            }
            let hint = Self::item_size_hint(item, storage);
            let min = hint.effective_minimum();
            visible_count += 1;

            preferred_main += self.main(hint.preferred);
            preferred_cross = preferred_cross.max(self.cross(hint.preferred));
            minimum_main += self.main(min);
            minimum_cross = minimum_cross.max(self.cross(min));
        }

        let spacing_total = self.spacing * visible_count.saturating_sub(1) as f32;
        let margins = self.margins.size();

        let preferred = self.make_size(preferred_main + spacing_total, preferred_cross);
        let minimum = self.make_size(minimum_main + spacing_total, minimum_cross);

        SizeHint::new(Size::new(
            preferred.width + margins.width,
            preferred.height + margins.height,
        ))
        .with_minimum(Size::new(
            minimum.width + margins.width,
            minimum.height + margins.height,
        ))
    }

    // =========================================================================
    // Calculation
    // =========================================================================

    /// Calculate item geometries for the current layout geometry.
    ///
    /// The results are stored internally and pushed to widgets by
    /// [`apply`](Self::apply).
    pub fn calculate<S: WidgetAccess>(&mut self, storage: &S) {
        self.item_geometries.clear();
        self.item_geometries.resize(self.items.len(), Rect::ZERO);

        let content = self.content_rect();
        let visible: Vec<usize> = (0..self.items.len())
            .filter(|&i| Self::is_item_visible(&self.items[i], storage))
            .collect();

        if visible.is_empty() {
            self.dirty = false;
            return;
        }

        let main_items: Vec<MainAxisItem> = visible
            .iter()
            .map(|&i| {
                let hint = Self::item_size_hint(&self.items[i], storage);
                let policy = Self::item_size_policy(&self.items[i], storage);
                MainAxisItem {
                    preferred: self.main(hint.preferred),
                    minimum: self.main(hint.effective_minimum()),
                    maximum: self.main(hint.effective_maximum()),
                    policy: self.main_policy(policy),
                    stretch: self.main_stretch(policy),
                }
            })
            .collect();

        let spacing_total = self.spacing * (visible.len() - 1) as f32;
        let available_main = (self.main(content.size) - spacing_total).max(0.0);
        let sizes = distribute_space(&main_items, available_main);

        let content_cross = self.cross(content.size);
        let mut offset = match self.orientation {
            Orientation::Horizontal => content.left(),
            Orientation::Vertical => content.top(),
        };

        for (slot, &index) in visible.iter().enumerate() {
            let hint = Self::item_size_hint(&self.items[index], storage);
            let policy = Self::item_size_policy(&self.items[index], storage);
            let main_size = sizes[slot];

            let max_cross = self.cross(hint.effective_maximum());
            let preferred_cross = self.cross(hint.preferred);
            let cross_size = match self.alignment {
                Alignment::Stretch if self.cross_policy(policy).can_grow() => {
                    content_cross.min(max_cross)
                }
                _ => preferred_cross.min(content_cross),
            };
            let cross_offset = match self.alignment {
                Alignment::Start => 0.0,
                Alignment::Center | Alignment::Stretch => {
                    ((content_cross - cross_size) / 2.0).max(0.0)
                }
                Alignment::End => (content_cross - cross_size).max(0.0),
            };

            self.item_geometries[index] = match self.orientation {
                Orientation::Horizontal => Rect::new(
                    offset,
                    content.top() + cross_offset,
                    main_size,
                    cross_size,
                ),
                Orientation::Vertical => Rect::new(
                    content.left() + cross_offset,
                    offset,
                    cross_size,
                    main_size,
                ),
            };

            offset += main_size + self.spacing;
        }

        self.dirty = false;
    }

    /// Push the calculated geometries onto the widgets in storage.
    ///
    /// Hidden and unresolvable widgets are skipped; spacers never receive
    /// geometry.
    pub fn apply<S: WidgetAccess>(&self, storage: &mut S) {
        for (item, rect) in self.items.iter().zip(&self.item_geometries) {
            let Some(id) = item.widget_id() else {
                continue;
            };
            let Some(widget) = storage.get_widget_mut(id) else {
                continue;
            };
            if !widget.is_visible() {
                continue;
            }
            if widget.geometry() != *rect {
                widget.set_geometry(*rect);
            }
        }
    }

    /// Recalculate and apply the layout if it is dirty.
    pub fn activate<S: WidgetAccess>(&mut self, storage: &mut S) {
        if self.dirty {
            self.calculate(&*storage);
            self.apply(storage);
        }
    }

    // =========================================================================
    // Item Queries
    // =========================================================================

    fn is_item_visible<S: WidgetAccess>(item: &LayoutItem, storage: &S) -> bool {
        match item {
            LayoutItem::Widget(id) => storage.get_widget(*id).is_some_and(|w| w.is_visible()),
            LayoutItem::Spacer(_) => true,
        }
    }

    fn item_size_hint<S: WidgetAccess>(item: &LayoutItem, storage: &S) -> SizeHint {
        match item {
            LayoutItem::Widget(id) => storage
                .get_widget(*id)
                .map(|w| w.size_hint())
                .unwrap_or_default(),
            LayoutItem::Spacer(spacer) => spacer.size_hint(),
        }
    }

    fn item_size_policy<S: WidgetAccess>(item: &LayoutItem, storage: &S) -> SizePolicyPair {
        match item {
            LayoutItem::Widget(id) => storage
                .get_widget(*id)
                .map(|w| w.size_policy())
                .unwrap_or_default(),
            LayoutItem::Spacer(spacer) => spacer.size_policy(),
        }
    }

    // =========================================================================
    // Axis Helpers
    // =========================================================================

    fn main(&self, size: Size) -> f32 {
        match self.orientation {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    fn cross(&self, size: Size) -> f32 {
        match self.orientation {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    fn make_size(&self, main: f32, cross: f32) -> Size {
        match self.orientation {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    fn main_policy(&self, policy: SizePolicyPair) -> SizePolicy {
        match self.orientation {
            Orientation::Horizontal => policy.horizontal,
            Orientation::Vertical => policy.vertical,
        }
    }

    fn cross_policy(&self, policy: SizePolicyPair) -> SizePolicy {
        match self.orientation {
            Orientation::Horizontal => policy.vertical,
            Orientation::Vertical => policy.horizontal,
        }
    }

    fn main_stretch(&self, policy: SizePolicyPair) -> u8 {
        match self.orientation {
            Orientation::Horizontal => policy.horizontal_stretch,
            Orientation::Vertical => policy.vertical_stretch,
        }
    }
}

impl Default for BoxLayout {
    fn default() -> Self {
        Self::horizontal()
    }
}

/// Main-axis inputs for space distribution, one per visible item.
#[derive(Debug, Clone, Copy)]
struct MainAxisItem {
    preferred: f32,
    minimum: f32,
    maximum: f32,
    policy: SizePolicy,
    stretch: u8,
}

/// Distribute the available main-axis space among items.
///
/// Items start at their preferred size; surplus goes to items that can grow
/// and deficit is taken from items that can shrink.
fn distribute_space(items: &[MainAxisItem], available: f32) -> Vec<f32> {
    let mut sizes: Vec<f32> = items.iter().map(|item| item.preferred).collect();
    let total: f32 = sizes.iter().sum();

    if available > total {
        distribute_extra_space(&mut sizes, items, available - total);
    } else if available < total {
        distribute_deficit_space(&mut sizes, items, total - available);
    }

    sizes
}

/// Hand out surplus space to growable items.
///
/// Items whose policy actively wants growth take priority over items that
/// merely tolerate it, so a stretch spacer or expanding widget absorbs all
/// the slack before preferred-size widgets are touched. Shares are
/// stretch-weighted and run in a single pass; an item that hits its maximum
/// forfeits the remainder of its share.
fn distribute_extra_space(sizes: &mut [f32], items: &[MainAxisItem], extra: f32) {
    let growable: Vec<usize> = (0..items.len())
        .filter(|&i| items[i].policy.can_grow() && items[i].maximum > sizes[i])
        .collect();
    let eager: Vec<usize> = growable
        .iter()
        .copied()
        .filter(|&i| items[i].policy.wants_to_grow())
        .collect();

    let pool = if eager.is_empty() { growable } else { eager };
    if pool.is_empty() {
        return;
    }

    let total_weight: f32 = pool
        .iter()
        .map(|&i| f32::from(items[i].stretch.max(1)))
        .sum();

    for &i in &pool {
        let weight = f32::from(items[i].stretch.max(1));
        let share = extra * weight / total_weight;
        let room = items[i].maximum - sizes[i];
        sizes[i] += share.min(room);
    }
}

/// Reclaim missing space from shrinkable items, proportional to how far
/// each one can shrink before hitting its minimum.
fn distribute_deficit_space(sizes: &mut [f32], items: &[MainAxisItem], deficit: f32) {
    let shrink_room = |sizes: &[f32], i: usize| -> f32 {
        if items[i].policy.can_shrink() {
            (sizes[i] - items[i].minimum).max(0.0)
        } else {
            0.0
        }
    };

    let total_room: f32 = (0..items.len()).map(|i| shrink_room(sizes, i)).sum();
    if total_room <= 0.0 {
        return;
    }

    // When the deficit exceeds the total shrink room the layout overflows;
    // items stop at their minimums.
    let factor = (deficit / total_room).min(1.0);
    for i in 0..items.len() {
        sizes[i] -= shrink_room(sizes, i) * factor;
    }
}
