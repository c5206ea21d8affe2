/**
This module aligns groups of sequences of different lengths. The shorter group is padded with a
sentinel (`MISSING`) or gets sentinels inserted at given positions before being padded. Both
operations work on copies and never touch the caller's sequences.
*/
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};

/// Label standing for a padded or inserted position.
pub const SENTINEL: &str = "MISSING";

/// A position of an aligned sequence: either a value coming from the input or a sentinel added
/// by the aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Aligned<T> {
    Value(T),
    Missing,
}

impl<T> Aligned<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
        }
    }
}

impl<'a> Aligned<&'a str> {
    /// The label of this position, with the sentinel standing in for missing positions.
    pub fn as_label(self) -> &'a str {
        match self {
            Self::Value(v) => v,
            Self::Missing => SENTINEL,
        }
    }
}

impl<T: Display> Display for Aligned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Missing => write!(f, "{}", SENTINEL),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which of the two groups given to the aligner.
pub enum Side {
    A,
    B,
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "a"),
            Self::B => write!(f, "b"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The sequences of a group do not share a single length, or the group is empty.
pub enum AlignmentError {
    EmptySide(Side),
    RaggedSide {
        side: Side,
        expected: usize,
        found: usize,
    },
}

impl Display for AlignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySide(side) => write!(f, "Side {} does not contain any sequence", side),
            Self::RaggedSide {
                side,
                expected,
                found,
            } => write!(
                f,
                "Sequences of side {} must share one length. Expected length {}, found length {}",
                side, expected, found
            ),
        }
    }
}
impl Error for AlignmentError {}

/// Both groups of sequences after alignment.
pub type AlignedSides<T, U> = (Vec<Vec<Aligned<T>>>, Vec<Vec<Aligned<U>>>);

fn side_length<T, S: AsRef<[T]>>(side: &[S], which: Side) -> Result<usize, AlignmentError> {
    let expected = side
        .first()
        .ok_or(AlignmentError::EmptySide(which))?
        .as_ref()
        .len();
    match side.iter().map(|s| s.as_ref().len()).find(|l| *l != expected) {
        Some(found) => Err(AlignmentError::RaggedSide {
            side: which,
            expected,
            found,
        }),
        None => Ok(expected),
    }
}

fn wrap<T: Clone, S: AsRef<[T]>>(side: &[S]) -> Vec<Vec<Aligned<T>>> {
    side.iter()
        .map(|s| s.as_ref().iter().cloned().map(Aligned::Value).collect())
        .collect()
}

/// Inserts the sentinel at each (sorted) index, one insertion after the other. Each index is
/// therefore the final position of a sentinel. Indexes past the end append.
fn insert_missing<T>(side: &mut [Vec<Aligned<T>>], sorted_indexes: &[usize]) {
    for sequence in side.iter_mut() {
        for &idx in sorted_indexes {
            let at = idx.min(sequence.len());
            sequence.insert(at, Aligned::Missing);
        }
    }
}

fn extend_to<T>(side: &mut [Vec<Aligned<T>>], target: usize) {
    for sequence in side.iter_mut() {
        let missing = target.saturating_sub(sequence.len());
        sequence.extend(std::iter::repeat_with(|| Aligned::Missing).take(missing));
    }
}

/// Pads every sequence of the shorter group with the sentinel so that both groups end up with
/// the same length. The longer group is returned unchanged.
///
/// * `a`: First group. All its sequences must share one length.
/// * `b`: Second group. All its sequences must share one length.
///
/// # Example
/// ```rust
/// use coltype_eval::{pad, Aligned};
///
/// let (a, b) = pad(&[vec!["a", "b", "c"]], &[vec!["a", "b"]]).unwrap();
/// assert_eq!(a[0], vec![Aligned::Value("a"), Aligned::Value("b"), Aligned::Value("c")]);
/// assert_eq!(b[0], vec![Aligned::Value("a"), Aligned::Value("b"), Aligned::Missing]);
/// ```
pub fn pad<T, U, A, B>(a: &[A], b: &[B]) -> Result<AlignedSides<T, U>, AlignmentError>
where
    T: Clone,
    U: Clone,
    A: AsRef<[T]>,
    B: AsRef<[U]>,
{
    insert_and_pad(a, b, &[])
}

/// Inserts the sentinel at the given indexes into every sequence of the shorter group, then pads
/// both groups to the same length. When both groups have the same length, `b` receives the
/// insertions. With no index, this is exactly `pad`.
///
/// * `a`: First group. All its sequences must share one length.
/// * `b`: Second group. All its sequences must share one length.
/// * `indexes`: Final positions of the inserted sentinels. Order and duplicates are ignored.
pub fn insert_and_pad<T, U, A, B>(
    a: &[A],
    b: &[B],
    indexes: &[usize],
) -> Result<AlignedSides<T, U>, AlignmentError>
where
    T: Clone,
    U: Clone,
    A: AsRef<[T]>,
    B: AsRef<[U]>,
{
    let a_len = side_length(a, Side::A)?;
    let b_len = side_length(b, Side::B)?;
    let mut sorted_indexes = indexes.to_vec();
    sorted_indexes.sort_unstable();
    sorted_indexes.dedup();

    let mut aligned_a = wrap(a);
    let mut aligned_b = wrap(b);
    if a_len < b_len {
        insert_missing(&mut aligned_a, &sorted_indexes);
    } else {
        insert_missing(&mut aligned_b, &sorted_indexes);
    }
    let target = aligned_a
        .first()
        .map_or(0, Vec::len)
        .max(aligned_b.first().map_or(0, Vec::len));
    extend_to(&mut aligned_a, target);
    extend_to(&mut aligned_b, target);
    Ok((aligned_a, aligned_b))
}
