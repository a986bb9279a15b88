//! Taskbar grouping identity.
//!
//! Windows groups taskbar buttons by the process AppUserModelID. Without an
//! explicit one, every window of the host process groups under the
//! executable path; setting one groups the chrome's windows under the
//! application's own identity instead.

/// Derive the grouping identity string for an application.
///
/// The result is `com.<vendor>.<app>` where `<app>` is the display name
/// lowercased with spaces removed. The vendor passes through unchanged.
///
/// # Example
///
/// ```
/// use casement::platform::grouping_identity;
///
/// assert_eq!(
///     grouping_identity("casement", "Crash Reporter"),
///     "com.casement.crashreporter"
/// );
/// ```
pub fn grouping_identity(vendor: &str, app_name: &str) -> String {
    let compact: String = app_name
        .chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect();
    format!("com.{}.{}", vendor, compact)
}

/// Apply a grouping identity to the current process, best effort.
///
/// On Windows this calls `SetCurrentProcessExplicitAppUserModelID`; other
/// platforms have no equivalent. Failures are logged at debug level and
/// otherwise discarded, so callers treat the operation as infallible.
///
/// The taskbar only honors identities set before the first window appears,
/// but re-applying later is harmless, which is why the chrome re-applies on
/// every app-name change.
pub fn apply_grouping_identity(id: &str) {
    apply_platform(id);
}

#[cfg(target_os = "windows")]
fn apply_platform(id: &str) {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;

    use windows::Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID;
    use windows::core::PCWSTR;

    let wide: Vec<u16> = OsStr::new(id)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    // SAFETY: the buffer is NUL-terminated and outlives the call; the API
    // copies the string before returning.
    let result = unsafe { SetCurrentProcessExplicitAppUserModelID(PCWSTR(wide.as_ptr())) };

    match result {
        Ok(()) => {
            tracing::debug!(
                target: casement_core::logging::targets::PLATFORM,
                id,
                "applied taskbar grouping identity"
            );
        }
        Err(e) => {
            tracing::debug!(
                target: casement_core::logging::targets::PLATFORM,
                id,
                error = %e,
                "failed to apply taskbar grouping identity"
            );
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn apply_platform(id: &str) {
    tracing::debug!(
        target: casement_core::logging::targets::PLATFORM,
        id,
        "taskbar grouping identity is not supported on this platform"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_identity_lowercases_and_strips_spaces() {
        assert_eq!(
            grouping_identity("casement", "Crash Reporter"),
            "com.casement.crashreporter"
        );
        assert_eq!(
            grouping_identity("acme", "My Cool App 2"),
            "com.acme.mycoolapp2"
        );
    }

    #[test]
    fn test_grouping_identity_keeps_vendor_verbatim() {
        assert_eq!(grouping_identity("Acme Corp", "App"), "com.Acme Corp.app");
    }

    #[test]
    fn test_grouping_identity_non_ascii() {
        assert_eq!(
            grouping_identity("casement", "\u{dc}berwachung Zentrale"),
            "com.casement.\u{fc}berwachungzentrale"
        );
    }

    #[test]
    fn test_apply_grouping_identity_never_panics() {
        // Best effort only; just verify it is callable everywhere.
        apply_grouping_identity("com.casement.test");
        apply_grouping_identity("");
    }
}
