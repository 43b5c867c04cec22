//! Yamldoc engine: discovery, conversion, ordering and emission of pages.
mod collect;
mod convert;
mod discovery;
mod emit;
mod engine;
mod persist;
mod render;
mod sidebar;
mod slug;
mod tags;
mod types;

pub use collect::{collect, collect_in, sort_pages, PageSource};
pub use convert::{effective_options, normalize_result, BackendError, ConversionBackend, Converter};
pub use discovery::{find_files, find_files_in};
pub use emit::{Emitter, INDEX_FILENAME};
pub use engine::YamlDocs;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, TEMP_PREFIX};
pub use render::{render_index_html, render_page_html};
pub use sidebar::render_sidebar;
pub use slug::{assign_slugs, sanitize_slug, slug_for};
pub use tags::{
    render_tags, render_yaml_block, render_yaml_file, resolve_tag_path, DocTag, TagKind,
};
pub use types::{Conversion, Failure, FailureKind, FailurePolicy, Page};
