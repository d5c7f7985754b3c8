use std::{error::Error, fmt, str::FromStr};

use hero_defence_core::{CellCoord, HeroClass};

/// Delimiter between the class and the cell.
const CLASS_DELIMITER: char = '@';
/// Delimiter between the column and the row.
const CELL_DELIMITER: char = ',';

/// Hero placement requested on the command line, written `class@column,row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HeroSpec {
    /// Class to purchase.
    pub(crate) class: HeroClass,
    /// Cell to place the hero on.
    pub(crate) cell: CellCoord,
}

impl FromStr for HeroSpec {
    type Err = HeroSpecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(HeroSpecError::Empty);
        }

        let Some((class, cell)) = trimmed.split_once(CLASS_DELIMITER) else {
            return Err(HeroSpecError::MissingCell);
        };
        let class = class.trim().to_ascii_lowercase();
        let Some(class) = HeroClass::from_key(&class) else {
            return Err(HeroSpecError::UnknownClass(class));
        };

        Ok(Self {
            class,
            cell: parse_cell(cell)?,
        })
    }
}

/// Errors that can occur while parsing a hero placement.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HeroSpecError {
    /// The value was empty or contained only whitespace.
    Empty,
    /// The `@column,row` part was missing.
    MissingCell,
    /// The class is not one of archer, warrior, or mage.
    UnknownClass(String),
    /// The cell could not be parsed as two unsigned integers.
    InvalidCell(String),
}

impl fmt::Display for HeroSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "hero placement was empty"),
            Self::MissingCell => write!(f, "expected `class@column,row`"),
            Self::UnknownClass(class) => {
                write!(f, "hero class '{class}' is not one of archer, warrior, mage")
            }
            Self::InvalidCell(cell) => write!(f, "could not parse cell '{cell}'"),
        }
    }
}

impl Error for HeroSpecError {}

fn parse_cell(cell: &str) -> Result<CellCoord, HeroSpecError> {
    let invalid = || HeroSpecError::InvalidCell(cell.to_owned());
    let (column, row) = cell.split_once(CELL_DELIMITER).ok_or_else(invalid)?;
    let column = column.trim().parse::<u32>().map_err(|_| invalid())?;
    let row = row.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(CellCoord::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_class_and_cell() {
        let spec: HeroSpec = "Mage@4, 3".parse().expect("spec parses");
        assert_eq!(
            spec,
            HeroSpec {
                class: HeroClass::Mage,
                cell: CellCoord::new(4, 3),
            }
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!("  ".parse::<HeroSpec>(), Err(HeroSpecError::Empty));
        assert_eq!("archer".parse::<HeroSpec>(), Err(HeroSpecError::MissingCell));
        assert_eq!(
            "knight@1,1".parse::<HeroSpec>(),
            Err(HeroSpecError::UnknownClass("knight".to_owned()))
        );
        assert_eq!(
            "archer@1;1".parse::<HeroSpec>(),
            Err(HeroSpecError::InvalidCell("1;1".to_owned()))
        );
        assert_eq!(
            "archer@-1,2".parse::<HeroSpec>(),
            Err(HeroSpecError::InvalidCell("-1,2".to_owned()))
        );
    }
}
