//! In-memory RGBA8 surface for software renderers and headless hosts.

use std::any::Any;

use crate::error::PlaybackError;
use crate::render::{Color, DrawContext, Rect, Surface};

/// Tightly packed RGBA8 pixels
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn fill(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some(Color::rgba(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }
}

impl DrawContext for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Double-buffered surface: renderers draw into the back buffer and
/// `present` copies it to the front.
#[derive(Clone, Debug)]
pub struct BufferSurface {
    back: PixelBuffer,
    front: PixelBuffer,
    presents: u64,
    clears: u64,
}

impl BufferSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            back: PixelBuffer::new(width, height),
            front: PixelBuffer::new(width, height),
            presents: 0,
            clears: 0,
        }
    }

    /// Last presented frame
    #[inline]
    pub fn front(&self) -> &PixelBuffer {
        &self.front
    }

    #[inline]
    pub fn presents(&self) -> u64 {
        self.presents
    }

    #[inline]
    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl Surface for BufferSurface {
    fn context(&mut self) -> Result<&mut dyn DrawContext, PlaybackError> {
        Ok(&mut self.back)
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.back.width, self.back.height)
    }

    fn clear(&mut self, color: Color) -> Result<(), PlaybackError> {
        self.back.fill(color);
        self.clears += 1;
        Ok(())
    }

    fn present(&mut self) -> Result<(), PlaybackError> {
        self.front.data.copy_from_slice(&self.back.data);
        self.presents += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.back = PixelBuffer::new(width, height);
        self.front = PixelBuffer::new(width, height);
    }
}
