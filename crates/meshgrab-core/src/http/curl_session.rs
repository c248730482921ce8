//! libcurl-backed [`Transport`].

use std::cell::RefCell;
use std::str;

use super::{GetRequest, ResponseHandler, ResponseHead, TransferSummary, Transport};
use crate::error::FetchError;

const MAX_REDIRECTS: u32 = 10;

/// Below this rate for a whole timeout window the transfer counts as stalled.
const STALL_SPEED_BYTES_PER_SEC: u32 = 1;

/// A reusable libcurl easy handle. Reusing one session across downloads keeps
/// connections to the same host alive.
pub struct CurlSession {
    easy: curl::easy::Easy,
}

impl CurlSession {
    pub fn new() -> Self {
        Self {
            easy: curl::easy::Easy::new(),
        }
    }
}

impl Default for CurlSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CurlSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurlSession").finish_non_exhaustive()
    }
}

impl Transport for CurlSession {
    fn get(
        &mut self,
        request: &GetRequest<'_>,
        handler: &mut dyn ResponseHandler,
    ) -> Result<TransferSummary, FetchError> {
        let easy = &mut self.easy;
        // Clears options from the previous request; the connection cache survives.
        easy.reset();
        easy.url(request.url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.useragent(request.user_agent)?;
        // No wall-clock cap: a large body may take as long as it needs while
        // bytes keep arriving. A stall longer than the timeout aborts.
        easy.connect_timeout(request.timeout)?;
        easy.low_speed_limit(STALL_SPEED_BYTES_PER_SEC)?;
        easy.low_speed_time(request.timeout)?;
        easy.buffer_size(request.chunk_size)?;

        // Header lines of the most recent response; redirects start a new block.
        let lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let mut head_delivered = false;
        let mut failure: Option<FetchError> = None;
        let mut received: u64 = 0;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                push_header_line(&mut lines.borrow_mut(), data);
                true
            })?;
            transfer.write_function(|data| {
                if !head_delivered {
                    head_delivered = true;
                    let head = ResponseHead::from_lines(lines.borrow().as_slice());
                    if let Err(e) = handler.on_response(&head) {
                        failure = Some(e);
                        return Ok(0); // abort transfer
                    }
                }
                match handler.on_chunk(data) {
                    Ok(()) => {
                        received += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        failure = Some(e);
                        Ok(0)
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = failure {
            return Err(e);
        }
        performed?;

        let status = easy.response_code()?;
        if !head_delivered {
            // Empty body: the write callback never ran.
            let mut head = ResponseHead::from_lines(lines.borrow().as_slice());
            if head.status == 0 {
                head.status = status;
            }
            handler.on_response(&head)?;
        }

        let effective_url = easy.effective_url()?.map(str::to_string);
        Ok(TransferSummary {
            status,
            effective_url,
            bytes: received,
        })
    }
}

/// Records one raw header line. A status line starts a new response block, so
/// only the final response of a redirect chain is kept. Bytes that are not
/// UTF-8 (latin-1 filenames, say) are replaced rather than losing the line.
fn push_header_line(lines: &mut Vec<String>, data: &[u8]) {
    let text = String::from_utf8_lossy(data);
    let line = text.trim_end();
    if line.starts_with("HTTP/") {
        lines.clear();
    }
    if !line.is_empty() {
        lines.push(line.to_string());
    }
}
