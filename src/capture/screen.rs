//! Terminal frame capture
//!
//! The draw loop records every completed frame; capturing encodes the most
//! recent one as UTF-8 text rows.

use super::{CaptureClientTrait, CaptureConfig};
use crate::error::CaptureError;
use async_trait::async_trait;
use ratatui::buffer::Buffer;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Characters of one rendered frame
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    /// Map of (col, row) -> character
    cells: HashMap<(u16, u16), char>,
    pub width: u16,
    pub height: u16,
}

impl FrameSnapshot {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: HashMap::new(),
            width,
            height,
        }
    }

    /// Copy the visible characters out of a rendered buffer
    pub fn from_buffer(buffer: &Buffer) -> Self {
        let area = buffer.area;
        let mut snapshot = Self::new(area.width, area.height);
        for row in 0..area.height {
            for col in 0..area.width {
                let cell = &buffer[(area.x + col, area.y + row)];
                if let Some(ch) = cell.symbol().chars().next() {
                    snapshot.set(col, row, ch);
                }
            }
        }
        snapshot
    }

    /// Record a character at a position
    pub fn set(&mut self, col: u16, row: u16, ch: char) {
        if col < self.width && row < self.height {
            self.cells.insert((col, row), ch);
        }
    }

    /// Get character at a position
    pub fn get(&self, col: u16, row: u16) -> Option<char> {
        self.cells.get(&(col, row)).copied()
    }

    /// Whole frame as text, one line per row
    pub fn to_text(&self, trim_trailing_whitespace: bool) -> String {
        let mut result = String::new();

        for row in 0..self.height {
            let mut row_text = String::new();
            for col in 0..self.width {
                row_text.push(self.get(col, row).unwrap_or(' '));
            }

            if trim_trailing_whitespace {
                result.push_str(row_text.trim_end());
            } else {
                result.push_str(&row_text);
            }

            // Newline between rows (but not after last row)
            if row + 1 < self.height {
                result.push('\n');
            }
        }

        result
    }
}

/// Capture collaborator backed by the last frame the terminal drew
#[derive(Debug, Clone, Default)]
pub struct ScreenCapture {
    latest: Arc<Mutex<Option<FrameSnapshot>>>,
}

impl ScreenCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a completed frame. Called by the draw loop after each draw.
    pub fn record(&self, buffer: &Buffer) {
        let snapshot = FrameSnapshot::from_buffer(buffer);
        match self.latest.lock() {
            Ok(mut latest) => *latest = Some(snapshot),
            Err(_) => tracing::warn!("Frame store poisoned, dropping frame"),
        }
    }

    fn encode_latest(&self, trim_trailing_whitespace: bool) -> Result<Vec<u8>, CaptureError> {
        let latest = self
            .latest
            .lock()
            .map_err(|_| CaptureError::Failed("frame store poisoned".to_string()))?;
        let snapshot = latest
            .as_ref()
            .ok_or_else(|| CaptureError::Unsupported("no frame has been rendered yet".to_string()))?;
        if snapshot.width == 0 || snapshot.height == 0 {
            return Err(CaptureError::Failed("frame has no area".to_string()));
        }
        Ok(snapshot.to_text(trim_trailing_whitespace).into_bytes())
    }
}

#[async_trait]
impl CaptureClientTrait for ScreenCapture {
    async fn capture(&self, config: &CaptureConfig) -> Result<Vec<u8>, CaptureError> {
        let delay = config.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.encode_latest(config.trim_trailing_whitespace)
    }
}
