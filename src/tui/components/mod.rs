//! # TUI Components
//!
//! One file per form control, each self-contained: state, events,
//! rendering and tests live together.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Receive everything they draw as fields:
//! - `TitleBar`: header, tagline and request status
//! - `DateField`: the date input (value lives in `FormState`)
//! - `MoodField`: collapsed mood selector
//! - `SubmitButton`: the analyze button
//! - `Notice`: blocking message overlay
//!
//! ## Stateful Components (Event-Driven)
//!
//! Own persistent state in `TuiState` and emit events:
//! - `JournalBox`: multi-line journal editor
//! - `MoodPickerState` / `MoodPicker`: mood overlay list
//! - `AnalysisPanelState` / `AnalysisPanel`: scrollable analysis output
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs
//! ├── date_field.rs
//! ├── mood_picker.rs
//! ├── journal_box/      (editor + wrapping layout)
//! ├── submit_button.rs
//! ├── analysis_panel.rs
//! └── notice.rs
//! ```

pub mod analysis_panel;
pub mod date_field;
pub mod journal_box;
pub mod mood_picker;
pub mod notice;
pub mod submit_button;
mod title_bar;

pub use analysis_panel::{AnalysisPanel, AnalysisPanelState};
pub use date_field::DateField;
pub use journal_box::{JournalBox, JournalEvent};
pub use mood_picker::{MoodField, MoodPicker, MoodPickerEvent, MoodPickerState};
pub use notice::Notice;
pub use submit_button::SubmitButton;
pub use title_bar::TitleBar;
