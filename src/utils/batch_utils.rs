use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Google rejects GET queries above 2000 characters; keep some headroom.
pub const MAX_GET_QUERY_LEN: usize = 1600;

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encoded_len(items: &[String]) -> usize {
    let joined = items.join(",");
    utf8_percent_encode(&joined, URI_COMPONENT)
        .map(|chunk| chunk.len())
        .sum()
}

/// Splits `items` into batches whose encoded length fits `max_encoded_len`.
///
/// Bisects by item count, so a single item longer than the budget still ends
/// up in its own batch instead of being rejected.
pub fn split_for_query(items: &[String], max_encoded_len: usize) -> Vec<Vec<String>> {
    let mut batches = vec![];
    split_into(items, max_encoded_len, &mut batches);
    batches
}

fn split_into(items: &[String], max_encoded_len: usize, batches: &mut Vec<Vec<String>>) {
    if items.len() > 1 && encoded_len(items) > max_encoded_len {
        let mid = items.len() / 2;
        split_into(&items[..mid], max_encoded_len, batches);
        split_into(&items[mid..], max_encoded_len, batches);
    } else {
        batches.push(items.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn small_items_stay_in_one_batch() {
        let batches = split_for_query(&strings(&["a", "b", "c"]), MAX_GET_QUERY_LEN);
        assert_eq!(batches, vec![strings(&["a", "b", "c"])]);
    }

    #[test]
    fn oversized_single_item_is_its_own_batch() {
        let long = vec!["x".repeat(2000)];
        let batches = split_for_query(&long, MAX_GET_QUERY_LEN);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], long);
    }

    #[test]
    fn concatenated_batches_reproduce_input() {
        let items: Vec<String> = (0..57)
            .map(|i| format!("zeile {} mit ümlauten & zeichen", i).repeat(i % 7 + 1))
            .collect();

        for budget in &[1, 10, 100, 400, MAX_GET_QUERY_LEN] {
            let batches = split_for_query(&items, *budget);
            let rejoined: Vec<String> = batches.into_iter().flatten().collect();
            assert_eq!(rejoined, items);
        }
    }

    #[test]
    fn batches_fit_budget_unless_singleton() {
        let items: Vec<String> = (0..40).map(|i| "wort ".repeat(i + 1)).collect();
        let batches = split_for_query(&items, 200);

        assert!(batches.len() > 1);
        for batch in batches {
            assert!(batch.len() == 1 || encoded_len(&batch) <= 200);
        }
    }

    #[test]
    fn splits_at_floor_midpoint() {
        let items = strings(&["aaaa", "bbbb", "cccc"]);
        // "aaaa,bbbb,cccc" encodes to 18 units, each half is below 12
        let batches = split_for_query(&items, 12);
        assert_eq!(batches, vec![strings(&["aaaa"]), strings(&["bbbb", "cccc"])]);
    }

    #[test]
    fn encoded_len_matches_uri_component_rules() {
        assert_eq!(encoded_len(&strings(&["abc"])), 3);
        // comma separator is encoded as %2C
        assert_eq!(encoded_len(&strings(&["a", "b"])), 5);
        assert_eq!(encoded_len(&strings(&["a b"])), 5);
        assert_eq!(encoded_len(&strings(&["-_.!~*'()"])), 9);
        // two UTF-8 bytes
        assert_eq!(encoded_len(&strings(&["ü"])), 6);
    }
}
