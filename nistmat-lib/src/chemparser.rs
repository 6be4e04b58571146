use crate::error::{NistMatError, Result};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Num(f64),
    LParen,
    RParen,
    Eos,
}

struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    fn new(input: &str) -> Self {
        Tokenizer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn next_token(&mut self) -> std::result::Result<Token, String> {
        if self.pos >= self.chars.len() {
            return Ok(Token::Eos);
        }

        let ch = self.chars[self.pos];

        if ch == '(' {
            self.pos += 1;
            return Ok(Token::LParen);
        }
        if ch == ')' {
            self.pos += 1;
            return Ok(Token::RParen);
        }

        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number();
        }

        // Symbol: one uppercase letter plus up to two lowercase ones
        if ch.is_ascii_uppercase() {
            let start = self.pos;
            self.pos += 1;
            while self.pos < self.chars.len()
                && self.pos - start < 3
                && self.chars[self.pos].is_ascii_lowercase()
            {
                self.pos += 1;
            }
            let name: String = self.chars[start..self.pos].iter().collect();
            return Ok(Token::Name(name));
        }

        Err(format!(
            "unrecognized character '{}' at position {}",
            ch, self.pos
        ))
    }

    fn read_number(&mut self) -> std::result::Result<Token, String> {
        let start = self.pos;

        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        if self.pos < self.chars.len() && self.chars[self.pos] == '.' {
            self.pos += 1;
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }

        if self.pos < self.chars.len()
            && (self.chars[self.pos] == 'e' || self.chars[self.pos] == 'E')
        {
            self.pos += 1;
            if self.pos < self.chars.len()
                && (self.chars[self.pos] == '+' || self.chars[self.pos] == '-')
            {
                self.pos += 1;
            }
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }

        let s: String = self.chars[start..self.pos].iter().collect();
        s.parse::<f64>()
            .map(Token::Num)
            .map_err(|_| format!("invalid number '{s}'"))
    }
}

/// Parse a chemical formula into (symbol, atom count) pairs.
///
/// Symbols are returned in order of first appearance, with repeated
/// symbols merged. Whether a symbol names a known element is left to the
/// catalog.
///
/// # Examples
/// ```
/// let result = nistmat::chemparser::chemparse("C2H5OH").unwrap();
/// assert_eq!(result[0], ("C".to_string(), 2.0));
/// assert_eq!(result[1], ("H".to_string(), 6.0));
/// assert_eq!(result[2], ("O".to_string(), 1.0));
/// ```
pub fn chemparse(formula: &str) -> Result<Vec<(String, f64)>> {
    let formula = preprocess_formula(formula);

    let mut tokenizer = Tokenizer::new(&formula);
    let current = tokenizer
        .next_token()
        .map_err(NistMatError::InvalidFormula)?;

    let (result, next) = parse_sequence(&mut tokenizer, current)?;

    if next != Token::Eos {
        return Err(NistMatError::InvalidFormula(format!(
            "unexpected token after formula: {formula}"
        )));
    }

    let mut out = Vec::new();
    add_to_result(&result, 1.0, &mut out);
    if out.is_empty() {
        return Err(NistMatError::InvalidFormula(format!(
            "formula has no elements: '{formula}'"
        )));
    }
    Ok(out)
}

// "Fe.7Mg.3O" -> "Fe0.7Mg0.3O"
fn preprocess_formula(formula: &str) -> String {
    let formula = formula.replace(' ', "");
    let chars: Vec<char> = formula.chars().collect();
    let mut result = String::with_capacity(formula.len() + 10);

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '.' && (i == 0 || !chars[i - 1].is_ascii_digit()) {
            result.push('0');
        }
        result.push(ch);
    }

    result
}

#[derive(Debug)]
enum FormulaNode {
    Element(String),
    Sequence(Vec<(FormulaNode, f64)>),
}

fn add_to_result(node: &FormulaNode, weight: f64, result: &mut Vec<(String, f64)>) {
    match node {
        FormulaNode::Element(sym) => match result.iter_mut().find(|(s, _)| s == sym) {
            Some((_, count)) => *count += weight,
            None => result.push((sym.clone(), weight)),
        },
        FormulaNode::Sequence(items) => {
            for (child, count) in items {
                add_to_result(child, weight * count, result);
            }
        }
    }
}

fn parse_count(tokenizer: &mut Tokenizer, current: &mut Token) -> Result<f64> {
    if let Token::Num(n) = *current {
        *current = tokenizer
            .next_token()
            .map_err(NistMatError::InvalidFormula)?;
        Ok(n)
    } else {
        Ok(1.0)
    }
}

fn parse_sequence(tokenizer: &mut Tokenizer, mut current: Token) -> Result<(FormulaNode, Token)> {
    let mut items: Vec<(FormulaNode, f64)> = Vec::new();

    loop {
        match &current {
            Token::LParen => {
                current = tokenizer
                    .next_token()
                    .map_err(NistMatError::InvalidFormula)?;
                let (inner, next) = parse_sequence(tokenizer, current)?;
                if next != Token::RParen {
                    return Err(NistMatError::InvalidFormula(
                        "expected closing parenthesis".to_string(),
                    ));
                }
                current = tokenizer
                    .next_token()
                    .map_err(NistMatError::InvalidFormula)?;
                let count = parse_count(tokenizer, &mut current)?;
                items.push((inner, count));
            }
            Token::Name(name) => {
                // D is an alias for H
                let sym = if name == "D" { "H".to_string() } else { name.clone() };
                current = tokenizer
                    .next_token()
                    .map_err(NistMatError::InvalidFormula)?;
                let count = parse_count(tokenizer, &mut current)?;
                items.push((FormulaNode::Element(sym), count));
            }
            _ => break,
        }
    }

    Ok((FormulaNode::Sequence(items), current))
}
