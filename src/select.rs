//! In-place rank selection (quickselect)
//!
//! Shared by the k-d tree build, which partitions row indices around the
//! median coordinate, and by the statistics pass, which picks the median of a
//! column without sorting it.

use std::cmp::Ordering;

/// Reorder `items` so that the element of rank `k` under `compare` sits at
/// position `k`, everything before it compares `<=` and everything after it
/// compares `>=`.
///
/// Uses a median-of-three pivot and a three-way partition, so runs of equal
/// elements do not degrade it. Expected linear time; there is no guard
/// against adversarial inputs.
///
/// Does nothing when `k` is out of bounds.
pub fn select_nth_by<T, F>(items: &mut [T], k: usize, mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if k >= items.len() {
        return;
    }

    let mut left = 0;
    let mut right = items.len() - 1;

    while left < right {
        let mid = left + (right - left) / 2;
        if compare(&items[mid], &items[left]) == Ordering::Less {
            items.swap(mid, left);
        }
        if compare(&items[right], &items[left]) == Ordering::Less {
            items.swap(right, left);
        }
        if compare(&items[right], &items[mid]) == Ordering::Less {
            items.swap(right, mid);
        }
        let pivot = items[mid];

        // [left, lt) < pivot, [lt, i) == pivot, (gt, right] > pivot
        let mut lt = left;
        let mut i = left;
        let mut gt = right;
        while i <= gt {
            match compare(&items[i], &pivot) {
                Ordering::Less => {
                    items.swap(lt, i);
                    lt += 1;
                    i += 1;
                }
                Ordering::Greater => {
                    items.swap(i, gt);
                    // items[left] <= pivot after median-of-three, so i > left here
                    gt -= 1;
                }
                Ordering::Equal => i += 1,
            }
        }

        if k < lt {
            right = lt - 1;
        } else if k > gt {
            left = gt + 1;
        } else {
            return;
        }
    }
}

/// Select the `k`-th smallest float under IEEE total ordering
pub fn select_nth_f64(values: &mut [f64], k: usize) -> Option<f64> {
    if k >= values.len() {
        return None;
    }
    select_nth_by(values, k, f64::total_cmp);
    Some(values[k])
}
