//! HAR (HTTP Archive) capture as a page session.
//!
//! A HAR export from browser devtools records every request the page made,
//! including ones issued by scripts, plus response bodies. Loading one gives
//! the crawler a browser's view of the page without driving a browser.

mod capture;
mod parse;

pub use capture::HarCapture;
