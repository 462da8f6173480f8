//! Transition rule: greedy move to the largest overlap, no immediate return.

use ndarray::ArrayView1;

/// Index of the first maximal entry in `row`.
pub fn first_max(row: ArrayView1<'_, u32>) -> usize {
    let mut best = 0;
    for (j, &value) in row.iter().enumerate() {
        if value > row[best] {
            best = j;
        }
    }
    best
}

/// The two largest values of `row`, duplicates counted (`top1 >= top2`).
///
/// `row` must have at least two entries.
fn two_largest(row: ArrayView1<'_, u32>) -> (u32, u32) {
    let mut top1 = 0;
    let mut top2 = 0;
    for &value in row {
        if value >= top1 {
            top2 = top1;
            top1 = value;
        } else if value > top2 {
            top2 = value;
        }
    }
    (top1, top2)
}

/// Choose the item that follows `current`, whose row is `row`, given that
/// the chain arrived from `previous`.
///
/// The candidate is the first maximal entry of the row. If it is `previous`
/// it is replaced:
///
/// - on a tie at the top, take the second index holding the top value, or
///   the first one if the second is `previous`;
/// - otherwise step down to the first index holding the runner-up value.
///
/// The whole row is scanned, diagonal included.
pub fn next_item(row: ArrayView1<'_, u32>, previous: usize) -> usize {
    let candidate = first_max(row);
    if candidate != previous {
        return candidate;
    }

    let (top1, top2) = two_largest(row);
    let mut holding = row
        .iter()
        .enumerate()
        .filter(move |&(_, &value)| value == top2)
        .map(|(j, _)| j);

    if top1 == top2 {
        let first = holding.next().unwrap_or(candidate);
        match holding.next() {
            Some(second) if second != previous => second,
            _ => first,
        }
    } else {
        holding.next().unwrap_or(candidate)
    }
}
