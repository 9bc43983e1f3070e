//! Output module for the JSON result and stderr diagnostics.
//!
//! Provides:
//! - Response documents written to stdout
//! - Colored status lines on stderr
//! - Progress bars
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod response;
pub mod stats;

pub use console::{print_error, print_info, print_success, print_warning};
pub use progress::{create_download_bar, create_item_bar};
pub use response::{
    write_json, CommentsResponse, DownloadResult, ErrorResponse, GalleryResult, ListingResponse,
    OutputPost, Pagination,
};
pub use stats::{batch_summary, print_batch_stats};
