//! Opacity masks for pixel-accurate hits
//!
//! The images themselves belong to the renderer. The simulation only needs
//! to know which pixels of a player's current pose are opaque, which the
//! renderer supplies through [`MaskSource`].

use glam::IVec2;

use super::player::Player;
use super::rect::Rect;

/// Per-pixel opacity of a sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl PixelMask {
    /// Every pixel opaque
    pub fn solid(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            bits: vec![true; len],
        }
    }

    /// From one alpha byte per pixel, row-major; nonzero alpha is opaque.
    /// Returns `None` if the buffer does not match the dimensions.
    pub fn from_alpha(width: i32, height: i32, alpha: &[u8]) -> Option<Self> {
        if width < 0 || height < 0 || alpha.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > 0).collect(),
        })
    }

    /// From packed RGBA8 pixels, row-major
    pub fn from_rgba(width: i32, height: i32, rgba: &[u8]) -> Option<Self> {
        if rgba.len() % 4 != 0 {
            return None;
        }
        let alpha: Vec<u8> = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Self::from_alpha(width, height, &alpha)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Opacity at local coordinates; outside the mask is transparent
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }
}

/// Supplies the body mask for a player's current pose.
///
/// `None` means "treat the whole bounding box as opaque".
pub trait MaskSource {
    fn body_mask(&self, player: &Player) -> Option<&PixelMask>;
}

/// Every player is a solid box
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidBodies;

impl MaskSource for SolidBodies {
    fn body_mask(&self, _player: &Player) -> Option<&PixelMask> {
        None
    }
}

/// One fixed mask per player, regardless of pose
#[derive(Debug, Clone, Default)]
pub struct PlayerMasks {
    masks: [Option<PixelMask>; 2],
}

impl PlayerMasks {
    pub fn new(one: PixelMask, two: PixelMask) -> Self {
        Self {
            masks: [Some(one), Some(two)],
        }
    }
}

impl MaskSource for PlayerMasks {
    fn body_mask(&self, player: &Player) -> Option<&PixelMask> {
        self.masks[player.id.index()].as_ref()
    }
}

fn opaque_at(mask: Option<&PixelMask>, origin: IVec2, x: i32, y: i32) -> bool {
    match mask {
        Some(mask) => mask.is_opaque(x - origin.x, y - origin.y),
        None => true,
    }
}

/// Pixel test over `area`: true if any pixel is opaque in both masks, each
/// mask placed at its owner's top-left corner
pub fn masks_overlap(
    area: Rect,
    first: Option<&PixelMask>,
    first_origin: IVec2,
    second: Option<&PixelMask>,
    second_origin: IVec2,
) -> bool {
    (area.top()..area.bottom()).any(|y| {
        (area.left()..area.right()).any(|x| {
            opaque_at(first, first_origin, x, y) && opaque_at(second, second_origin, x, y)
        })
    })
}
