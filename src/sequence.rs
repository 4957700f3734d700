use std::convert::TryFrom;

use anyhow::{anyhow, Result};

use crate::errors::{IndexError, ValueError};

/// Normalize a possibly negative `index` against `len`
///
/// Negative indices count from the end. Returns `None` if the result is out of bounds.
fn normalize(index: isize, len: usize) -> Option<usize> {
    let len = isize::try_from(len).ok()?;
    let idx = if index < 0 { index + len } else { index };

    if idx < 0 || idx >= len {
        None
    } else {
        Some(idx as usize)
    }
}

/// Fetch the element at `index`
///
/// Negative indices count from the end, so `-1` is the last element.
pub fn index<T>(seq: &[T], index: isize) -> Result<&T> {
    normalize(index, seq.len())
        .map(|i| &seq[i])
        .ok_or_else(|| anyhow!(IndexError { index, len: seq.len() }))
}

/// Clamp a slice bound into `lower..=upper` after resolving negative values against `len`
fn clamp_bound(bound: isize, len: isize, lower: isize, upper: isize) -> isize {
    let b = if bound < 0 { bound + len } else { bound };
    b.max(lower).min(upper)
}

/// Extract the elements from `start` (inclusive) to `stop` (exclusive), taking every `step`th
///
/// Omitted bounds default to the ends of the sequence (swapped when stepping backwards).
/// Negative bounds count from the end and out of range bounds are clamped, so this never
/// fails except on a zero `step`.
pub fn slice<T: Clone>(
    seq: &[T],
    start: Option<isize>,
    stop: Option<isize>,
    step: Option<isize>,
) -> Result<Vec<T>> {
    let step = step.unwrap_or(1);
    if step == 0 {
        return Err(anyhow!(ValueError("slice step cannot be zero".to_string())));
    }

    let len = isize::try_from(seq.len())?;
    let mut ret = Vec::new();

    if step > 0 {
        let start = start.map_or(0, |b| clamp_bound(b, len, 0, len));
        let stop = stop.map_or(len, |b| clamp_bound(b, len, 0, len));

        let mut i = start;
        while i < stop {
            ret.push(seq[i as usize].clone());
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    } else {
        // Walking backwards the first element sits at `len - 1` and `-1` means "before the
        // first element"
        let start = start.map_or(len - 1, |b| clamp_bound(b, len, -1, len - 1));
        let stop = stop.map_or(-1, |b| clamp_bound(b, len, -1, len - 1));

        let mut i = start;
        while i > stop {
            ret.push(seq[i as usize].clone());
            i += step;
        }
    }

    Ok(ret)
}

#[cfg(test)]
const SQUARES: [i128; 10] = [0, 1, 4, 9, 16, 25, 36, 49, 64, 81];

#[cfg(test)]
type SliceArgs = (Option<isize>, Option<isize>, Option<isize>);

#[test]
fn test_index() {
    let words = ["spam", "eggs", "sausages"];

    assert_eq!(*index(&words, 0).expect("in range"), "spam");
    assert_eq!(*index(&words, 2).expect("in range"), "sausages");
    assert_eq!(*index(&words, -1).expect("in range"), "sausages");
    assert_eq!(*index(&words, -3).expect("in range"), "spam");

    for bad in &[3, 100, -4, isize::MIN] {
        let err = index(&words, *bad).unwrap_err();
        let index_err = err.downcast_ref::<IndexError>().expect("not IndexError");
        assert_eq!(index_err.index, *bad);
        assert_eq!(index_err.len, 3);
    }

    let empty: [i128; 0] = [];
    assert!(index(&empty, 0).is_err());
}

#[test]
fn test_slice_forward() {
    let tests: Vec<(SliceArgs, Vec<i128>)> = vec![
        ((Some(2), Some(6), None), vec![4, 9, 16, 25]),
        ((Some(7), None, None), vec![49, 64, 81]),
        ((None, Some(7), None), vec![0, 1, 4, 9, 16, 25, 36]),
        ((None, None, Some(2)), vec![0, 4, 16, 36, 64]),
        ((Some(2), Some(8), Some(3)), vec![4, 25]),
        ((None, None, None), SQUARES.to_vec()),
        ((Some(-3), None, None), vec![49, 64, 81]),
        ((Some(-100), Some(2), None), vec![0, 1]),
        ((Some(8), Some(100), None), vec![64, 81]),
        ((Some(6), Some(2), None), vec![]),
        ((Some(10), None, None), vec![]),
        ((Some(1), Some(-1), Some(4)), vec![1, 25]),
    ];

    for ((start, stop, step), expected) in tests {
        assert_eq!(
            slice(&SQUARES, start, stop, step).expect("slice failed"),
            expected,
            "[{:?}:{:?}:{:?}]",
            start,
            stop,
            step
        );
    }
}

#[test]
fn test_slice_backward() {
    let tests: Vec<(SliceArgs, Vec<i128>)> = vec![
        ((None, None, Some(-1)), vec![81, 64, 49, 36, 25, 16, 9, 4, 1, 0]),
        ((None, None, Some(-3)), vec![81, 36, 9, 0]),
        ((Some(5), Some(1), Some(-2)), vec![25, 9]),
        ((Some(100), Some(7), Some(-1)), vec![81, 64]),
        ((Some(2), Some(-100), Some(-1)), vec![4, 1, 0]),
        ((Some(-2), None, Some(-4)), vec![64, 16, 0]),
        ((Some(1), Some(5), Some(-1)), vec![]),
    ];

    for ((start, stop, step), expected) in tests {
        assert_eq!(
            slice(&SQUARES, start, stop, step).expect("slice failed"),
            expected,
            "[{:?}:{:?}:{:?}]",
            start,
            stop,
            step
        );
    }
}

#[test]
fn test_slice_zero_step() {
    let err = slice(&SQUARES, None, None, Some(0)).unwrap_err();
    assert!(err.is::<ValueError>());
    assert_eq!(err.to_string(), "slice step cannot be zero");
}
