//! Printing model output
//!
//! The text pipeline buffers the whole answer because speech synthesis needs
//! it; the vision pipeline echoes fragments as they arrive.

use crate::error::RequestError;
use crate::provider::ResponseStream;
use futures::TryStreamExt;
use std::io::Write;

pub const TEXT_DELIMITER: &str = "-------------------------------------";
pub const VISION_DELIMITER: &str = "________________________________________________";

/// Concatenate every present, non-empty fragment in arrival order.
pub async fn accumulate(stream: ResponseStream) -> Result<String, RequestError> {
    stream
        .try_fold(String::new(), |mut text, fragment| async move {
            if let Some(fragment) = fragment {
                text.push_str(&fragment);
            }
            Ok(text)
        })
        .await
}

/// Print a finished answer between the text delimiters.
pub fn print_answer(out: &mut dyn Write, answer: &str) -> std::io::Result<()> {
    writeln!(out, "{}", answer)?;
    writeln!(out, "{}\n", TEXT_DELIMITER)
}

/// Echo fragments as they arrive, framed by the vision delimiters.
///
/// Returns the number of characters written.
pub async fn present_incremental(
    mut stream: ResponseStream,
    out: &mut dyn Write,
) -> crate::error::Result<usize> {
    writeln!(out, "{}\n", VISION_DELIMITER)?;
    out.flush()?;

    let mut written = 0;
    while let Some(fragment) = stream.try_next().await? {
        let Some(fragment) = fragment.filter(|f| !f.is_empty()) else {
            continue;
        };
        write!(out, "{}", fragment)?;
        out.flush()?;
        written += fragment.chars().count();
    }

    writeln!(out, "\n{}\n", VISION_DELIMITER)?;
    out.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream::{self, StreamExt};

    fn fragments(items: Vec<Option<&'static str>>) -> ResponseStream {
        stream::iter(items.into_iter().map(|f| Ok(f.map(String::from)))).boxed()
    }

    #[tokio::test]
    async fn test_accumulate_skips_absent_fragments() {
        let text = accumulate(fragments(vec![Some("Hel"), Some("lo"), None, Some(" world")]))
            .await
            .unwrap();
        assert_eq!(text, "Hello world");
    }

    #[tokio::test]
    async fn test_accumulate_empty_stream() {
        assert_eq!(accumulate(fragments(vec![])).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_accumulate_propagates_errors() {
        let stream = stream::iter(vec![
            Ok(Some("partial".to_string())),
            Err(RequestError::Stream("connection reset".into())),
        ])
        .boxed();
        assert!(matches!(
            accumulate(stream).await,
            Err(RequestError::Stream(_))
        ));
    }

    #[test]
    fn test_print_answer_layout() {
        let mut out = Vec::new();
        print_answer(&mut out, "4").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("4\n{}\n\n", TEXT_DELIMITER));
    }

    #[tokio::test]
    async fn test_incremental_output() {
        let mut out = Vec::new();
        let written = present_incremental(
            fragments(vec![Some("A "), None, Some(""), Some("cat")]),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(written, 5);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{d}\n\nA cat\n{d}\n\n", d = VISION_DELIMITER)
        );
    }
}
