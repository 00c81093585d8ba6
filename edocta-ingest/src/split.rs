//! Delimiter-aware column splitter shared by the line-based tokenizers.

/// Split one line on `delimiter`, honoring single and double quotes.
///
/// Quote state toggles per character: inside a quoted run, the delimiter
/// and the other quote character are ordinary text. The enclosing quotes
/// themselves are stripped from the field.
pub fn split_delimited(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => field.push(ch),
            None => {
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                } else if ch == delimiter {
                    fields.push(std::mem::take(&mut field));
                } else {
                    field.push(ch);
                }
            }
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_split() {
        assert_eq!(
            split_delimited("a,b,c", ','),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_delimiter_inside_double_quotes() {
        let fields = split_delimited("01/03/2024,\"PAGO, SERVICIOS\",\"1,500.00\"", ',');
        assert_eq!(fields, vec!["01/03/2024", "PAGO, SERVICIOS", "1500.00"]);
    }

    #[test]
    fn test_delimiter_inside_single_quotes() {
        let fields = split_delimited("'31122024','ABONO, SPEI',500.00", ',');
        assert_eq!(fields, vec!["31122024", "ABONO, SPEI", "500.00"]);
    }

    #[test]
    fn test_other_quote_char_is_literal_while_quoted() {
        let fields = split_delimited("\"D'AGOSTINO, SA\",100", ',');
        assert_eq!(fields, vec!["D'AGOSTINO, SA", "100"]);
    }

    #[test]
    fn test_trailing_empty_field() {
        assert_eq!(split_delimited("a,b,", ','), vec!["a", "b", ""]);
    }

    #[test]
    fn test_pipe_delimiter() {
        let fields = split_delimited("05-Ene-2024|DEPOSITO|REF1|0|100.00|100.00", '|');
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[1], "DEPOSITO");
    }
}
