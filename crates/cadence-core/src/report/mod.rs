//! Reporting interface for an external debug-panel collaborator.
//!
//! The loop only ever writes into the collaborator; it never reads back.
//! Every instrumentation feature degrades to a no-op when no reporter is
//! attached, so the core runs unchanged without one.

/// Opaque identifier for a panel minted by a [`Reporter`].
///
/// The core stores and echoes these; only the reporter interprets them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PanelId(pub u64);

/// External display collaborator.
pub trait Reporter {
    /// Creates a named panel and returns its handle.
    fn add_panel(&mut self, title: &str) -> PanelId;

    /// Replaces a panel's text content.
    fn update_text(&mut self, panel: PanelId, text: &str);

    /// Pushes a meter sample to a panel; `1.0` means a fully idle frame,
    /// `0.0` a fully spent budget, negative values an overrun.
    fn update_meter(&mut self, panel: PanelId, value: f64);
}
