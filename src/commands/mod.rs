pub mod export;
pub mod headings;
mod pipeline;
pub mod render;
