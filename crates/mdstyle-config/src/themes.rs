//! Custom themes from `[themes.<id>]` tables.

use mdstyle_themes::Theme;
use toml::{Table, Value};

use crate::ConfigError;

/// Build themes from the `[themes]` table, in file order.
pub(crate) fn parse_themes(table: &Table) -> Result<Vec<Theme>, ConfigError> {
    table
        .iter()
        .map(|(id, value)| parse_theme(id, value))
        .collect()
}

fn parse_theme(id: &str, value: &Value) -> Result<Theme, ConfigError> {
    let field = format!("themes.{id}");
    let table = as_table(value, &field)?;

    let name = match table.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            return Err(ConfigError::Validation(format!(
                "{field}.name must be a string"
            )));
        }
        None => id.to_owned(),
    };
    let mut theme = Theme::new(id, name);

    for (key, value) in table {
        match key.as_str() {
            "name" => {}
            "base" => {
                let base_field = format!("{field}.base");
                for (property, value) in as_table(value, &base_field)? {
                    let value = scalar(value, &format!("{base_field}.{property}"))?;
                    theme = theme.with_base(property, &value);
                }
            }
            "block" => {
                let block_field = format!("{field}.block");
                for (selector, rule) in as_table(value, &block_field)? {
                    let rule_field = format!("{block_field}.{selector}");
                    for (property, value) in as_table(rule, &rule_field)? {
                        let value = scalar(value, &format!("{rule_field}.{property}"))?;
                        theme = theme.with_rule(selector, property, &value);
                    }
                }
            }
            other => {
                return Err(ConfigError::Validation(format!(
                    "unknown key {field}.{other}"
                )));
            }
        }
    }

    Ok(theme)
}

fn as_table<'a>(value: &'a Value, field: &str) -> Result<&'a Table, ConfigError> {
    value
        .as_table()
        .ok_or_else(|| ConfigError::Validation(format!("{field} must be a table")))
}

/// CSS value of a scalar. Arrays, tables and dates are rejected.
fn scalar(value: &Value, field: &str) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must be a string, number or boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdstyle_themes::Declaration;
    use pretty_assertions::assert_eq;

    fn parse(toml: &str) -> Result<Vec<Theme>, ConfigError> {
        let table: Table = toml::from_str(toml).unwrap();
        parse_themes(&table)
    }

    #[test]
    fn test_parse_theme_keeps_order() {
        let themes = parse(
            r##"
[paper]
name = "Paper"

[paper.base]
line-height = 1.8
color = "#222"

[paper.block.h1]
font-size = "2em"
color = "#000"

[paper.block."pre, code"]
background = "#f6f6f6"
"##,
        )
        .unwrap();

        assert_eq!(themes.len(), 1);
        let theme = &themes[0];
        assert_eq!(theme.id, "paper");
        assert_eq!(theme.name, "Paper");
        assert_eq!(
            theme.base,
            vec![
                Declaration::new("line-height", "1.8"),
                Declaration::new("color", "#222")
            ]
        );
        let h1 = theme.rule("h1").unwrap();
        assert_eq!(h1.declarations[0], Declaration::new("font-size", "2em"));
        assert_eq!(h1.declarations[1], Declaration::new("color", "#000"));
        assert!(theme.rule("pre, code").is_some());
    }

    #[test]
    fn test_name_defaults_to_id() {
        let themes = parse("[plain]\n").unwrap();
        assert_eq!(themes[0].name, "plain");
    }

    #[test]
    fn test_non_scalar_value_rejected() {
        let err = parse("[bad.base]\nfont = [\"a\", \"b\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("themes.bad.base.font"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse("[bad]\ncolour = \"red\"\n").unwrap_err();
        assert!(err.to_string().contains("themes.bad.colour"));
    }
}
