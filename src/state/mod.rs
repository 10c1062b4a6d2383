/// State management module
///
/// This module holds everything the editor knows about the card:
/// - The card document itself: text, sections, slots (card.rs)
/// - Background and font presets (options.rs)
/// - Layout and export configuration (config.rs)
/// - User-facing notices (notice.rs)

pub mod card;
pub mod config;
pub mod notice;
pub mod options;
