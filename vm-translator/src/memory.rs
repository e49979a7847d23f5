//! Memory segment address calculation.
//!
//! Handles the mapping between VM segments and Hack RAM addresses.

use crate::parser::Segment;

/// Segment access mode for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentAccess {
    /// Constant values (immediate)
    Constant,
    /// Indirect via base pointer (LCL, ARG, THIS, THAT)
    Indirect(&'static str),
    /// Direct RAM address (temp, pointer)
    Direct,
    /// Static variables with filename prefix
    Static,
}

/// Get the base pointer symbol for indirect segments.
pub fn segment_base_symbol(segment: Segment) -> Option<&'static str> {
    match segment {
        Segment::Local => Some("LCL"),
        Segment::Argument => Some("ARG"),
        Segment::This => Some("THIS"),
        Segment::That => Some("THAT"),
        _ => None,
    }
}

/// Determine the access mode for a segment.
pub fn segment_access(segment: Segment) -> SegmentAccess {
    match segment {
        Segment::Constant => SegmentAccess::Constant,
        Segment::Local => SegmentAccess::Indirect("LCL"),
        Segment::Argument => SegmentAccess::Indirect("ARG"),
        Segment::This => SegmentAccess::Indirect("THIS"),
        Segment::That => SegmentAccess::Indirect("THAT"),
        Segment::Pointer | Segment::Temp => SegmentAccess::Direct,
        Segment::Static => SegmentAccess::Static,
    }
}

/// Calculate the RAM address for temp segment.
/// Temp segment is RAM[5..12], so temp i maps to RAM[5+i].
#[inline]
pub fn temp_address(index: u16) -> u16 {
    5 + index
}

/// Get the symbol for pointer segment.
/// pointer 0 = THIS (RAM[3])
/// pointer 1 = THAT (RAM[4])
#[inline]
pub fn pointer_symbol(index: u16) -> &'static str {
    if index == 0 { "THIS" } else { "THAT" }
}

/// Check if a segment uses indirect addressing.
#[inline]
pub fn is_indirect_segment(segment: Segment) -> bool {
    matches!(
        segment,
        Segment::Local | Segment::Argument | Segment::This | Segment::That
    )
}
