/// A single key=value override parsed from the CSV-encoded values input. The value is
/// absent for a field which carries no '='; flag assembly renders such a value as the
/// literal 'undefined', matching what deployments relying on this adapter already see.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ValueAssignment {
    pub(crate) key: String,
    pub(crate) value: Option<String>,
}

/// Parses the CSV-encoded values input into an ordered list of key=value assignments.
/// The input is split on line boundaries, each line is tokenized as CSV fields with
/// double-quote quoting, and each field is split on its first '='. Duplicate keys are
/// kept as-is, in encounter order. Helm applies the last --set for a path, so the
/// duplicates must survive normalization.
pub(crate) fn value_assignments(raw: &str) -> Vec<ValueAssignment> {
    let mut assignments: Vec<ValueAssignment> = Vec::new();

    for line in raw.split(['\r', '\n']) {
        for field in csv_fields(line) {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }

            let (key, value) = match field.split_once('=') {
                Some((key, value)) => (key, Some(value.to_string())),
                None => (field, None),
            };

            assignments.push(ValueAssignment {
                key: key.to_string(),
                value,
            });
        }
    }

    assignments
}

/// Tokenizes one line into CSV fields. Double quotes group a region which may contain
/// commas, and a doubled quote inside a quoted region is an escaped quote. An
/// unterminated quote runs to the end of the line.
fn csv_fields(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;

    let mut characters = line.chars().peekable();
    while let Some(character) = characters.next() {
        match character {
            '"' if quoted => {
                if characters.peek() == Some(&'"') {
                    characters.next();
                    field.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' => quoted = true,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(character),
        }
    }
    fields.push(field);

    fields
}

/// Normalizes a list input to an ordered list of non-empty strings. The raw input may
/// be empty (empty list), a JSON-encoded array, or a plain string (singleton list).
/// Non-array JSON values and non-string array members are discarded silently.
pub(crate) fn string_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let parsed: serde_json::Value = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        // Assume it's a single bare string.
        Err(_) => return vec![raw.to_string()],
    };

    match parsed {
        serde_json::Value::Array(members) => members
            .into_iter()
            .filter_map(|member| match member {
                serde_json::Value::String(member) if !member.is_empty() => Some(member),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// A default-aware tri-state for boolean inputs, keeping 'not set' apart from 'set
/// false'.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Toggle {
    Unset,
    True,
    False,
}

impl Toggle {
    /// Parses a raw boolean input. An empty input is Unset, the literal 'true' (any
    /// case) is True, anything else is False.
    pub(crate) fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            Toggle::Unset
        } else if raw.eq_ignore_ascii_case("true") {
            Toggle::True
        } else {
            Toggle::False
        }
    }

    /// Resolves the toggle to a bool, falling back to the given default when Unset.
    pub(crate) fn resolve(self, default: bool) -> bool {
        match self {
            Toggle::Unset => default,
            Toggle::True => true,
            Toggle::False => false,
        }
    }
}

/// The action discriminator. Only the literal 'remove' selects the uninstall action,
/// every other input deploys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    Deploy,
    Remove,
}

impl Task {
    /// Parses the raw task input.
    pub(crate) fn parse(raw: &str) -> Self {
        match raw.trim() {
            "remove" => Task::Remove,
            _ => Task::Deploy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{string_list, value_assignments, Task, Toggle, ValueAssignment};

    fn assignment(key: &str, value: Option<&str>) -> ValueAssignment {
        ValueAssignment {
            key: key.to_string(),
            value: value.map(ToString::to_string),
        }
    }

    #[test]
    fn test_value_assignments_comma_and_line_separated() {
        assert_eq!(
            value_assignments("foo=bar,baz=qux\nquux=corge"),
            vec![
                assignment("foo", Some("bar")),
                assignment("baz", Some("qux")),
                assignment("quux", Some("corge")),
            ]
        );
    }

    #[test]
    fn test_value_assignments_preserve_duplicates_in_order() {
        assert_eq!(
            value_assignments("a=1,a=2,a=1"),
            vec![
                assignment("a", Some("1")),
                assignment("a", Some("2")),
                assignment("a", Some("1")),
            ]
        );
    }

    #[test]
    fn test_value_assignments_split_on_first_equals_only() {
        assert_eq!(
            value_assignments("probes.url=http://a=b"),
            vec![assignment("probes.url", Some("http://a=b"))]
        );
    }

    #[test]
    fn test_value_assignments_without_equals_have_no_value() {
        assert_eq!(
            value_assignments("standalone"),
            vec![assignment("standalone", None)]
        );
    }

    #[test]
    fn test_value_assignments_respect_quoting() {
        assert_eq!(
            value_assignments(r#"tolerations="a,b",replicas=3"#),
            vec![
                assignment("tolerations", Some("a,b")),
                assignment("replicas", Some("3")),
            ]
        );
        assert_eq!(
            value_assignments(r#"quote="say ""hi""""#),
            vec![assignment("quote", Some(r#"say "hi""#))]
        );
    }

    #[test]
    fn test_value_assignments_trim_and_skip_empty_fields() {
        assert_eq!(
            value_assignments(" a=1 ,, b=2 \n\n"),
            vec![assignment("a", Some("1")), assignment("b", Some("2"))]
        );
        assert_eq!(value_assignments(""), vec![]);
    }

    #[test]
    fn test_string_list_from_json_array() {
        assert_eq!(
            string_list(r#"["a","b"]"#),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_string_list_from_bare_string() {
        assert_eq!(string_list("values/prod.yml"), vec!["values/prod.yml"]);
    }

    #[test]
    fn test_string_list_from_empty_input() {
        assert_eq!(string_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_string_list_discards_non_array_json() {
        assert_eq!(string_list(r#"{"a":"b"}"#), Vec::<String>::new());
        assert_eq!(string_list("42"), Vec::<String>::new());
    }

    #[test]
    fn test_string_list_filters_empty_members() {
        assert_eq!(string_list(r#"["a","","b",null,7]"#), vec!["a", "b"]);
    }

    #[test]
    fn test_toggle_parse_and_resolve() {
        assert_eq!(Toggle::parse(""), Toggle::Unset);
        assert_eq!(Toggle::parse("true"), Toggle::True);
        assert_eq!(Toggle::parse("True"), Toggle::True);
        assert_eq!(Toggle::parse("false"), Toggle::False);
        assert_eq!(Toggle::parse("yes"), Toggle::False);

        assert!(Toggle::Unset.resolve(true));
        assert!(!Toggle::Unset.resolve(false));
        assert!(Toggle::True.resolve(false));
        assert!(!Toggle::False.resolve(true));
    }

    #[test]
    fn test_task_parse() {
        assert_eq!(Task::parse("remove"), Task::Remove);
        assert_eq!(Task::parse(""), Task::Deploy);
        assert_eq!(Task::parse("deploy"), Task::Deploy);
        assert_eq!(Task::parse("delete"), Task::Deploy);
    }
}
