//! PCNT counter codec and bitwise incrementer.
//!
//! The payload is an unsigned big-endian integer: byte 0 is the most
//! significant, byte `size - 1` the least. Decoding, encoding and
//! incrementing all share that orientation, independent of host byte order.

use tracing::{debug, trace, warn};

use crate::error::Rejected;
use crate::frame::{Frame, MIN_COUNTER_WIDTH};

/// Widest counter that still fits in a `u64`.
pub const MAX_NATIVE_WIDTH: usize = std::mem::size_of::<u64>();

/// A decoded play count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    /// The counter value.
    Value(u64),
    /// The counter is wider than a `u64` can hold.
    Unrepresentable,
}

impl Count {
    /// The value, or `u64::MAX` when the counter does not fit.
    pub fn saturating(self) -> u64 {
        match self {
            Count::Value(v) => v,
            Count::Unrepresentable => u64::MAX,
        }
    }

    pub fn value(self) -> Option<u64> {
        match self {
            Count::Value(v) => Some(v),
            Count::Unrepresentable => None,
        }
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Count::Value(v) => write!(f, "{v}"),
            Count::Unrepresentable => write!(f, ">{}", u64::MAX),
        }
    }
}

/// Result of an operation that may need a wider or narrower frame.
///
/// `Replaced` hands back both frames: `frame` is authoritative from now on,
/// `stale` is the input and must be unlinked from its tag and dropped.
#[derive(Debug)]
pub enum CountUpdate {
    /// The input frame was updated in place.
    Unchanged(Frame),
    /// The counter moved to a newly allocated frame.
    Replaced { frame: Frame, stale: Frame },
}

impl CountUpdate {
    /// The authoritative frame.
    pub fn frame(&self) -> &Frame {
        match self {
            CountUpdate::Unchanged(frame) | CountUpdate::Replaced { frame, .. } => frame,
        }
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, CountUpdate::Replaced { .. })
    }

    /// Split into the authoritative frame and, on replacement, the stale one.
    pub fn into_parts(self) -> (Frame, Option<Frame>) {
        match self {
            CountUpdate::Unchanged(frame) => (frame, None),
            CountUpdate::Replaced { frame, stale } => (frame, Some(stale)),
        }
    }

    /// Keep the authoritative frame, dropping any stale one.
    pub fn into_frame(self) -> Frame {
        self.into_parts().0
    }
}

/// Decode the counter stored in `frame`.
pub fn get_count(frame: &Frame) -> Count {
    if frame.size() > MAX_NATIVE_WIDTH {
        warn!(width = frame.size(), "play counter wider than u64");
        return Count::Unrepresentable;
    }

    let value = frame
        .data()
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    Count::Value(value)
}

/// Smallest counter width able to hold `value`, never below the format minimum.
pub fn width_for(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(8).max(MIN_COUNTER_WIDTH)
}

/// Result of [`set_count`] and [`increment`]. On failure the input frame is
/// handed back untouched inside [`Rejected`].
pub type CountResult = std::result::Result<CountUpdate, Rejected>;

/// Store `value` in `frame`, reallocating when the minimal width differs.
pub fn set_count(mut frame: Frame, value: u64) -> CountResult {
    let width = width_for(value);

    if width == frame.size() {
        encode_be(frame.data_mut(), value);
        trace!(value, width, "set play count in place");
        return Ok(CountUpdate::Unchanged(frame));
    }

    let (mut next, stale) = reallocate(frame, width)?;
    encode_be(next.data_mut(), value);
    debug!(value, from = stale.size(), to = width, "resized play counter");
    Ok(CountUpdate::Replaced { frame: next, stale })
}

/// Add one to the counter without decoding it to a host integer.
///
/// A saturated counter (every bit set) grows by one byte instead of wrapping:
/// the carry lands in the new most significant byte.
pub fn increment(mut frame: Frame) -> CountResult {
    if frame.data().iter().all(|&b| b == u8::MAX) {
        let width = frame.size() + 1;
        let (mut next, stale) = reallocate(frame, width)?;
        next.data_mut()[0] = 1;
        debug!(width, "play counter overflowed, widened");
        return Ok(CountUpdate::Replaced { frame: next, stale });
    }

    // Not saturated, so some byte absorbs the carry.
    for byte in frame.data_mut().iter_mut().rev() {
        let (sum, carry) = byte.overflowing_add(1);
        *byte = sum;
        if !carry {
            break;
        }
    }
    trace!(width = frame.size(), "incremented play counter");
    Ok(CountUpdate::Unchanged(frame))
}

/// Allocate a zeroed `width`-byte replacement carrying `frame`'s flags.
fn reallocate(frame: Frame, width: usize) -> std::result::Result<(Frame, Frame), Rejected> {
    match Frame::pcnt_with_width(width) {
        Ok(mut next) => {
            next.set_flags(frame.flags());
            Ok((next, frame))
        }
        Err(error) => Err(Rejected { frame, error }),
    }
}

fn encode_be(dst: &mut [u8], value: u64) {
    let bytes = value.to_be_bytes();
    let width = dst.len();
    dst.copy_from_slice(&bytes[MAX_NATIVE_WIDTH - width..]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameId;

    fn inc(frame: Frame) -> Frame {
        increment(frame).unwrap().into_frame()
    }

    #[test]
    fn increments_through_first_byte_boundary() {
        let mut frame = Frame::pcnt().unwrap();
        for _ in 0..255 {
            frame = inc(frame);
        }
        assert_eq!(frame.data(), &[0, 0, 0, 255]);
        assert_eq!(get_count(&frame), Count::Value(255));

        let frame = inc(frame);
        assert_eq!(frame.data(), &[0, 0, 1, 0]);
        assert_eq!(get_count(&frame), Count::Value(256));
    }

    #[test]
    fn set_count_beyond_four_bytes_replaces() {
        let update = set_count(Frame::pcnt().unwrap(), 5_000_000_000).unwrap();
        assert!(update.is_replaced());

        let (frame, stale) = update.into_parts();
        assert_eq!(frame.size(), 5);
        assert_eq!(frame.data(), &5_000_000_000u64.to_be_bytes()[3..]);
        assert_eq!(get_count(&frame), Count::Value(5_000_000_000));
        assert_eq!(stale.map(|s| s.size()), Some(4));
    }

    #[test]
    fn set_count_same_width_is_in_place() {
        let update = set_count(Frame::pcnt().unwrap(), 0xDEAD_BEEF).unwrap();
        assert!(!update.is_replaced());
        assert_eq!(update.frame().data(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn set_count_shrinks_to_minimal_width() {
        let wide = Frame::pcnt_with_width(7).unwrap();
        let update = set_count(wide, 0).unwrap();
        assert!(update.is_replaced());
        assert_eq!(update.frame().data(), &[0, 0, 0, 0]);
    }

    #[test]
    fn round_trips_across_widths() {
        for width in MIN_COUNTER_WIDTH..=MAX_NATIVE_WIDTH {
            let max = if width == MAX_NATIVE_WIDTH {
                u64::MAX
            } else {
                (1u64 << (width * 8)) - 1
            };
            for value in [0, 1, 255, 256, max / 3, max - 1, max] {
                let frame = set_count(Frame::pcnt().unwrap(), value)
                    .unwrap()
                    .into_frame();
                assert_eq!(get_count(&frame), Count::Value(value), "width {width}");
                assert!(frame.size() <= width);
            }
        }
    }

    #[test]
    fn saturated_counter_grows_by_one_byte() {
        for width in MIN_COUNTER_WIDTH..=12 {
            let mut frame = Frame::pcnt_with_width(width).unwrap();
            frame.data_mut().fill(0xFF);
            let old = get_count(&frame);

            let update = increment(frame).unwrap();
            assert!(update.is_replaced());
            let frame = update.into_frame();

            assert_eq!(frame.size(), width + 1);
            assert_eq!(frame.data()[0], 1);
            assert!(frame.data()[1..].iter().all(|&b| b == 0));
            if let Count::Value(old) = old {
                if width < MAX_NATIVE_WIDTH {
                    assert_eq!(get_count(&frame), Count::Value(old + 1));
                }
            }
        }
    }

    #[test]
    fn growth_past_u64_is_unrepresentable() {
        let frame = set_count(Frame::pcnt().unwrap(), u64::MAX)
            .unwrap()
            .into_frame();
        assert_eq!(frame.size(), 8);

        let frame = inc(frame);
        assert_eq!(frame.size(), 9);
        assert_eq!(get_count(&frame), Count::Unrepresentable);
        assert_eq!(get_count(&frame).saturating(), u64::MAX);
    }

    #[test]
    fn increments_past_two_to_the_33() {
        let target = 1u64 << 33;
        let mut frame = set_count(Frame::pcnt().unwrap(), target - 300)
            .unwrap()
            .into_frame();
        for _ in 0..600 {
            frame = inc(frame);
        }
        assert_eq!(get_count(&frame), Count::Value(target + 300));
        assert_eq!(frame.size(), 5);
    }

    #[test]
    fn fresh_counter_grows_across_two_to_the_32() {
        let fresh = Frame::pcnt().unwrap();
        let start = u32::MAX as u64 - 100;
        let update = set_count(fresh, start).unwrap();
        assert!(!update.is_replaced());

        let mut frame = update.into_frame();
        let mut expected = start;
        for _ in 0..300 {
            let update = increment(frame).unwrap();
            expected += 1;
            assert_eq!(update.is_replaced(), expected == 1 << 32, "value {expected}");
            frame = update.into_frame();

            assert_eq!(get_count(&frame), Count::Value(expected));
            assert_eq!(frame.size(), width_for(expected));
        }
        assert_eq!(frame.size(), 5);
        assert_eq!(get_count(&frame), Count::Value(u32::MAX as u64 + 1 + 199));

        // Continue from the same frame up to and past 2^33.
        frame = set_count(frame, (1 << 33) - 10).unwrap().into_frame();
        for _ in 0..20 {
            frame = inc(frame);
        }
        assert_eq!(get_count(&frame), Count::Value((1 << 33) + 10));
        assert_eq!(frame.size(), 5);
    }

    #[test]
    fn increment_agrees_with_encoder_bytewise() {
        let seeds = [0u64, 0xFFFF - 5, 0xFF_FFFF - 5, 0xFFFF_FFFF - 5, 0xFF_FFFF_FFFF - 5];
        for seed in seeds {
            let mut frame = set_count(Frame::pcnt().unwrap(), seed)
                .unwrap()
                .into_frame();
            for step in 1..=10u64 {
                frame = inc(frame);
                let expected = set_count(Frame::pcnt().unwrap(), seed + step)
                    .unwrap()
                    .into_frame();
                assert_eq!(frame.data(), expected.data(), "seed {seed} step {step}");
            }
        }
    }

    #[test]
    fn replacement_keeps_flags() {
        let mut frame = Frame::pcnt().unwrap();
        frame.set_flags(0x4000);
        frame.data_mut().fill(0xFF);

        let frame = inc(frame);
        assert_eq!(frame.flags(), 0x4000);
        assert_eq!(frame.id(), FrameId::PCNT);
    }

    #[test]
    fn width_for_values() {
        assert_eq!(width_for(0), 4);
        assert_eq!(width_for(u32::MAX as u64), 4);
        assert_eq!(width_for(u32::MAX as u64 + 1), 5);
        assert_eq!(width_for(u64::MAX), 8);
    }

    #[test]
    fn count_display() {
        assert_eq!(Count::Value(42).to_string(), "42");
        assert_eq!(Count::Unrepresentable.value(), None);
    }
}
