//! Lock-overlay decision

/// Whether the lock overlay covers the report
///
/// Shown iff a report exists, streaming has finished, and the profile has
/// not been unlocked. While fragments are still arriving the report renders
/// freely; an unlocked profile never sees the overlay.
#[inline]
#[must_use]
pub fn overlay_visible(report_present: bool, streaming_finished: bool, unlocked: bool) -> bool {
    report_present && streaming_finished && !unlocked
}
