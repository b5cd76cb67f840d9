use crate::error::RsaError;

/// Return every ordered selection of `length` elements, without repeats, in a stable order.
///  Each element takes a turn in the first position (in input order), followed by every
///  ordering of the remaining elements for the rest of the length.
///
///  A `length` of zero or one wraps each element on its own.
///  Asking for more elements than are provided is an `InvalidLength` error.
pub fn permute<T: Clone>(elements: &[T], length: usize) -> Result<Vec<Vec<T>>, RsaError> {
    if length <= 1 {
        return Ok(elements.iter().map(|element| vec![element.clone()]).collect());
    }

    if length > elements.len() {
        return Err(RsaError::InvalidLength { length, available: elements.len() });
    }

    let mut result = Vec::new();
    let mut used = vec![false; elements.len()];
    let mut prefix = Vec::with_capacity(length);

    permute_inner(elements, length, &mut used, &mut prefix, &mut result);
    Ok(result)
}

fn permute_inner<T: Clone>(elements: &[T], length: usize, used: &mut [bool], prefix: &mut Vec<T>, result: &mut Vec<Vec<T>>) {
    // If every position is filled, add this arrangement
    if prefix.len() == length {
        result.push(prefix.clone());
        return;
    }

    // Try each element not already placed in the next position
    for (i, element) in elements.iter().enumerate() {
        if used[i] { continue; }

        used[i] = true;
        prefix.push(element.clone());
        permute_inner(elements, length, used, prefix, result);
        prefix.pop();
        used[i] = false;
    }
}

/// Number of results `permute` returns for `count` elements (n! / (n - length)!).
pub fn permutation_count(count: usize, length: usize) -> usize {
    if length <= 1 {
        return count;
    }

    if length > count {
        return 0;
    }

    (count - length + 1..=count).fold(1usize, |total, n| total.saturating_mul(n))
}
