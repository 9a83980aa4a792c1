//! The modification language: whitespace-separated mutation
//! operations, optionally closed by a description operation that
//! swallows the rest of the input verbatim.
//!
//! ```text
//! modification := (op (ws op)*)? ws? descriptionOp? ws?
//! op           := renameOp | removeValueOp | addValueOp | hardSetOp
//!               | softSetOp | removeTagOp | addTagOp
//! renameOp     := tagName ws? '>>' ws? tagName
//! removeValueOp:= tagName ':' '-' valueUnit
//! addValueOp   := tagName ':' '+' valueUnit
//! hardSetOp    := tagName ':' '=' valueUnit
//! softSetOp    := tagName ':' valueUnit
//! removeTagOp  := '-' tagName
//! addTagOp     := tagName
//! descriptionOp:= '#' rest-of-input | '-#' rest-of-input(ignored)
//! ```

use std::collections::BTreeSet;

use crate::error::{Result, SnapzError};
use crate::lang::scan::{is_kebab_char, Scanner};
use crate::model::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModOp {
    /// `name` — ensure the tag exists (empty value set).
    AddTag(String),
    /// `-name` — drop the tag entirely.
    RemoveTag(String),
    /// `old >> new` — re-key the tag, keeping its values.
    RenameTag { from: String, to: String },
    /// `name:unit` — set the value set, but refuse to clobber a tag
    /// that already holds two or more different values.
    SoftSet { name: String, values: Vec<String> },
    /// `name:=unit` — set the value set unconditionally.
    HardSet { name: String, values: Vec<String> },
    /// `name:+unit` — union values in.
    AddValues { name: String, values: Vec<String> },
    /// `name:-unit` — remove values; an emptied tag stays present.
    RemoveValues { name: String, values: Vec<String> },
    /// `#text` — set the description to the rest of the input.
    SetDescription(String),
    /// `-#` — clear the description.
    ClearDescription,
}

impl ModOp {
    /// Applies this operation to one document. Only `SoftSet` can
    /// fail; everything else is unconditional.
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        match self {
            ModOp::AddTag(name) => {
                doc.tags.entry(name.clone()).or_default();
            }
            ModOp::RemoveTag(name) => {
                doc.tags.remove(name);
            }
            ModOp::RenameTag { from, to } => {
                if let Some(values) = doc.tags.remove(from) {
                    doc.tags.insert(to.clone(), values);
                }
            }
            ModOp::SoftSet { name, values } => {
                let incoming = to_value_set(values);
                match doc.tags.get_mut(name) {
                    None => {
                        doc.tags.insert(name.clone(), incoming);
                    }
                    Some(existing) if *existing == incoming => {}
                    Some(existing) if existing.len() >= 2 => {
                        return Err(SnapzError::SoftSetConflict {
                            name: name.clone(),
                            existing: existing.iter().cloned().collect(),
                            incoming: incoming.into_iter().collect(),
                        });
                    }
                    Some(existing) => {
                        *existing = incoming;
                    }
                }
            }
            ModOp::HardSet { name, values } => {
                doc.tags.insert(name.clone(), to_value_set(values));
            }
            ModOp::AddValues { name, values } => {
                doc.tags
                    .entry(name.clone())
                    .or_default()
                    .extend(values.iter().cloned());
            }
            ModOp::RemoveValues { name, values } => {
                if let Some(existing) = doc.tags.get_mut(name) {
                    for value in values {
                        existing.remove(value);
                    }
                }
            }
            ModOp::SetDescription(text) => {
                doc.description = Some(text.clone());
            }
            ModOp::ClearDescription => {
                doc.description = None;
            }
        }
        Ok(())
    }
}

fn to_value_set(values: &[String]) -> BTreeSet<String> {
    values.iter().cloned().collect()
}

/// A parsed modification: operations in written order. A description
/// operation, when present, is always last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modification {
    pub ops: Vec<ModOp>,
}

impl Modification {
    pub fn new(ops: Vec<ModOp>) -> Self {
        Modification { ops }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

pub fn parse_modification(input: &str) -> Result<Modification> {
    let mut scanner = Scanner::new(input);
    let mut ops = Vec::new();

    if at_op_start(&scanner) {
        ops.push(parse_op(&mut scanner)?);
        loop {
            let save = scanner.pos();
            if !scanner.skip_ws() {
                break;
            }
            if !at_op_start(&scanner) {
                scanner.set_pos(save);
                break;
            }
            ops.push(parse_op(&mut scanner)?);
        }
    }

    scanner.skip_ws();
    if let Some(op) = parse_description_op(&mut scanner) {
        ops.push(op);
    }
    scanner.skip_ws();
    if !scanner.is_eof() {
        return Err(scanner.error("an operation"));
    }

    Ok(Modification::new(ops))
}

fn at_op_start(scanner: &Scanner) -> bool {
    match scanner.peek() {
        Some('-') => scanner.peek_second().is_some_and(is_kebab_char),
        Some(ch) => is_kebab_char(ch),
        None => false,
    }
}

fn parse_op(scanner: &mut Scanner) -> Result<ModOp> {
    if scanner.eat('-') {
        let name = scanner.kebab("a tag name")?;
        return Ok(ModOp::RemoveTag(name));
    }

    let name = scanner.kebab("a tag name")?;

    // `old >> new`; anything else after the name is re-examined from
    // the saved position.
    let save = scanner.pos();
    scanner.skip_ws();
    if scanner.eat_str(">>") {
        scanner.skip_ws();
        let to = scanner.kebab("a tag name")?;
        return Ok(ModOp::RenameTag { from: name, to });
    }
    scanner.set_pos(save);

    if !scanner.eat(':') {
        return Ok(ModOp::AddTag(name));
    }

    if scanner.eat('=') {
        let values = scanner.value_unit()?;
        return Ok(ModOp::HardSet { name, values });
    }
    if scanner.eat('+') {
        let values = scanner.value_unit()?;
        return Ok(ModOp::AddValues { name, values });
    }
    if scanner.eat('-') {
        let values = scanner.value_unit()?;
        return Ok(ModOp::RemoveValues { name, values });
    }

    let values = scanner.value_unit()?;
    Ok(ModOp::SoftSet { name, values })
}

fn parse_description_op(scanner: &mut Scanner) -> Option<ModOp> {
    if scanner.eat_str("-#") {
        scanner.take_rest();
        return Some(ModOp::ClearDescription);
    }
    if scanner.eat('#') {
        return Some(ModOp::SetDescription(scanner.take_rest().to_string()));
    }
    None
}
