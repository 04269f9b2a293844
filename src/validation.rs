use crate::error::{Result, Error};

const MAX_SYMBOL_LEN: usize = 32;

/// Normalizes the argument of `/check`: first word, optional leading `$`
/// removed, upper-cased. `Ok(None)` means no argument was given.
pub fn parse_symbol_arg(args: &str) -> Result<Option<String>> {
    let Some(word) = args.split_whitespace().next() else {
        return Ok(None);
    };
    let symbol = word.trim_start_matches('$').to_uppercase();
    validate_symbol(&symbol)?;
    Ok(Some(symbol))
}

pub fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty() {
        return Err(Error::InvalidInput("Symbol cannot be empty".to_string()));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(Error::InvalidInput(format!(
            "Symbol is too long (max {} characters)",
            MAX_SYMBOL_LEN
        )));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(Error::InvalidInput(
            "Symbol must contain only letters, digits, '_', '-' or '.'".to_string(),
        ));
    }
    Ok(())
}
