//! Command implementations
//!
//! Each command takes the parsed input document and returns the JSON
//! result. Nothing here touches stdin, stdout or the filesystem.

use super::args::Commands;
use crate::core::{
    contains, difference, every_truthy, flatten, intersection, invoke, pluck, reduce, shuffle,
    shuffle_with, some_truthy, sort_by_property, uniq, uniq_by, zip, Callee, Collection, Record,
};
use crate::error::{ErrorCode, UnderbarError};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::debug;

fn expect_array<'a>(input: &'a Value, command: &str) -> Result<&'a [Value]> {
    match input {
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(UnderbarError::invalid_argument_with_code(
            ErrorCode::ARGUMENT_NOT_A_SEQUENCE,
            format!(
                "{} expects an array, got {}",
                command,
                crate::core::collection::json_type_name(other)
            ),
            Some("input".to_string()),
        )
        .into()),
    }
}

fn expect_arrays<'a>(input: &'a Value, command: &str) -> Result<Vec<&'a [Value]>> {
    expect_array(input, command)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            expect_array(item, command).with_context(|| format!("element {} of the input", index))
        })
        .collect()
}

fn options_to_json(values: Vec<Option<Value>>) -> Value {
    Value::Array(
        values
            .into_iter()
            .map(|value| value.unwrap_or(Value::Null))
            .collect(),
    )
}

/// Rewrite integral floats as integers so `1` and `1.0` compare equal
fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(f)
                if !number.is_i64()
                    && !number.is_u64()
                    && f.fract() == 0.0
                    && f >= i64::MIN as f64
                    && f < i64::MAX as f64 =>
            {
                Value::from(f as i64)
            }
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), normalize_numbers(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Run `command` against `input`
pub fn execute(command: &Commands, input: &Value) -> Result<Value> {
    debug!("Executing {:?}", command);
    match command {
        Commands::Uniq { by, sorted } => {
            let input = normalize_numbers(input);
            let items = expect_array(&input, "uniq")?;
            let result = match by {
                Some(field) => uniq_by(items, *sorted, |item| item.field(field)),
                None => uniq(items, *sorted),
            };
            Ok(Value::Array(result))
        }
        Commands::Flatten => Ok(Value::Array(flatten(expect_array(input, "flatten")?))),
        Commands::Shuffle { seed } => {
            let items = expect_array(input, "shuffle")?;
            let result = match seed {
                Some(seed) => shuffle_with(items, &mut StdRng::seed_from_u64(*seed)),
                None => shuffle(items),
            };
            Ok(Value::Array(result))
        }
        Commands::SortBy { field } => {
            let items = expect_array(input, "sort-by")?;
            Ok(Value::Array(sort_by_property(items, field)))
        }
        Commands::Pluck { field } => {
            let items = expect_array(input, "pluck")?;
            Ok(options_to_json(pluck(items, field)))
        }
        Commands::Zip => {
            let arrays = expect_arrays(input, "zip")?;
            let rows = zip(&arrays).into_iter().map(options_to_json).collect();
            Ok(Value::Array(rows))
        }
        Commands::Intersection => {
            let input = normalize_numbers(input);
            let arrays = expect_arrays(&input, "intersection")?;
            Ok(Value::Array(intersection(&arrays)))
        }
        Commands::Difference => {
            let input = normalize_numbers(input);
            let arrays = expect_arrays(&input, "difference")?;
            let Some((first, rest)) = arrays.split_first() else {
                return Ok(Value::Array(Vec::new()));
            };
            Ok(Value::Array(difference(*first, rest)))
        }
        Commands::Contains { value } => {
            let target: Value = serde_json::from_str(value)
                .with_context(|| format!("Failed to parse '{}' as JSON", value))?;
            let target = normalize_numbers(&target);
            let input = normalize_numbers(input);
            let collection = Collection::try_from(&input)?;
            Ok(Value::Bool(contains(collection, &target)))
        }
        Commands::Every => Ok(Value::Bool(every_truthy(Collection::try_from(input)?))),
        Commands::Some => Ok(Value::Bool(some_truthy(Collection::try_from(input)?))),
        Commands::Sum { initial } => {
            let numbers: Vec<f64> = serde_json::from_value(input.clone())
                .context("sum expects an array of numbers")?;
            let total = reduce(&numbers, |total: f64, n: &f64| total + n, *initial)?;
            Ok(Value::from(total))
        }
        Commands::Invoke { method } => {
            let strings: Vec<String> = serde_json::from_value(input.clone())
                .context("invoke expects an array of strings")?;
            let results = invoke(&strings, Callee::named(method), &())?;
            Ok(Value::from(results))
        }
    }
}
