// Summarization pipeline for NoteDrop
pub mod markdown;
pub mod outline;
pub mod summary;
pub mod text;

pub use markdown::{guess_title, to_markdown, NotesDocument};
pub use outline::{build_outline, OutlineChunk};
pub use summary::{select_takeaways, top_terms};
pub use text::{normalize, split_sentences, tokenize};
