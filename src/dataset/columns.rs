// src/dataset/columns.rs

use super::Dataset;

/// Extensions that mark a field as holding image references. Matched as
/// case-insensitive substrings, not suffixes: a query string or a path
/// segment mentioning `.jpg` qualifies.
const IMAGE_EXTENSIONS: [&str; 8] = [
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tiff", ".svg",
];

/// How many leading rows are sampled per field when classifying columns.
const SAMPLE_ROWS: usize = 5;

pub fn has_image_extension(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    let lower = value.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}

/// Classifies dataset fields as image columns. A field qualifies if any of
/// its first `SAMPLE_ROWS` trimmed values contains an image extension.
/// Returned in header order; empty for an empty dataset.
pub fn detect_image_columns(dataset: &Dataset) -> Vec<String> {
    if dataset.rows.is_empty() {
        return Vec::new();
    }
    dataset
        .headers()
        .iter()
        .filter(|field| {
            dataset
                .rows
                .iter()
                .take(SAMPLE_ROWS)
                .filter_map(|row| dataset.value(row, field.as_str()))
                .any(|value| has_image_extension(value.trim()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset_from(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn detects_url_column_and_excludes_plain_text() {
        let dataset = dataset_from(
            "name,photo_url\n\
             alice,https://cdn.example/a.jpg\n\
             bob,https://cdn.example/b.jpg\n\
             carol,https://cdn.example/c.jpg\n",
        );
        assert_eq!(detect_image_columns(&dataset), ["photo_url"]);
    }

    #[test]
    fn one_matching_sample_is_enough() {
        let dataset = dataset_from(
            "mixed\n\
             plain text\n\
             https://cdn.example/pic.png\n\
             more text\n",
        );
        assert_eq!(detect_image_columns(&dataset), ["mixed"]);
    }

    #[test]
    fn extension_match_is_substring_not_suffix() {
        let dataset = dataset_from(
            "photo\nhttps://cdn.example/pic.jpeg?width=1080&dl=1\n",
        );
        assert_eq!(detect_image_columns(&dataset), ["photo"]);

        let mention = dataset_from("notes\nplease resend the .webp version\n");
        assert_eq!(detect_image_columns(&mention), ["notes"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dataset = dataset_from("photo\nHTTPS://CDN.EXAMPLE/PIC.JPG\n");
        assert_eq!(detect_image_columns(&dataset), ["photo"]);
    }

    #[test]
    fn only_the_first_five_rows_are_sampled() {
        let dataset = dataset_from(
            "photo\na\nb\nc\nd\ne\nhttps://cdn.example/late.jpg\n",
        );
        assert!(detect_image_columns(&dataset).is_empty());
    }

    #[test]
    fn empty_dataset_yields_no_columns() {
        let dataset = dataset_from("name,photo_url\n");
        assert!(detect_image_columns(&dataset).is_empty());
    }

    #[test]
    fn columns_come_back_in_header_order() {
        let dataset = dataset_from(
            "b_url,name,a_url\n\
             x.png,alice,y.gif\n",
        );
        assert_eq!(detect_image_columns(&dataset), ["b_url", "a_url"]);
    }
}
