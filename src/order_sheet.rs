//! Weekly order-sheet scanner
//!
//! The weekly sheet is a hand-maintained workbook with no header schema.
//! Orders are laid out in two parallel column triples — (A, B, C) and
//! (E, F, G) — each triple holding (label/product, quantity, price) cells.
//! A customer block opens at a row whose label cell contains the pickup
//! marker phrase; everything below it belongs to that customer until the
//! next marker. The scan walks the first triple over all rows, then the
//! second triple over all rows, threading the active block through as
//! explicit local state.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::{AppError, Result};
use crate::models::MeasurementType;
use crate::utils::first_token;

/// Marker phrase that opens a customer block; the customer name precedes
/// it in the cell, the phone number follows it
pub const PICKUP_MARKER: &str = "איסוף: לוד";
/// Label of the surcharge/fee row inside a block
pub const FEE_LABEL: &str = "תוספות";
/// Label of the declared-total row inside a block
pub const TOTAL_LABEL: &str = "סך הכל";
/// Column-header placeholder repeated above each product list
pub const PRODUCT_HEADER: &str = "מוצר";
/// Weight unit marker inside quantity cells (kilogram)
pub const WEIGHT_UNIT: &str = "ק\"ג";

/// The two column triples: (label, quantity, price)
const COLUMN_SETS: [(usize, usize, usize); 2] = [(0, 1, 2), (4, 5, 6)];

/// One product line reconstructed from a sheet row
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine {
    /// Product name with quote characters stripped
    pub name: String,
    /// Quantity, rounded to 3 decimals
    pub quantity: f64,
    /// Unit price derived as the row's price cell divided by the quantity
    pub unit_price: f64,
    /// Weight-based when the quantity cell carries the weight unit marker
    pub measurement_type: MeasurementType,
}

/// One customer block: the marker line plus everything scanned under it
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerBlock {
    /// Customer display name, trimmed text before the marker
    pub name: String,
    /// Phone number, trimmed text after the marker
    pub phone: String,
    /// Parsed surcharge row, when present
    pub fee: Option<f64>,
    /// Parsed declared-total row, when present
    pub total: Option<f64>,
    /// Product lines in scan order
    pub lines: Vec<ProductLine>,
}

/// The fully scanned sheet, blocks in discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSheet {
    pub blocks: Vec<CustomerBlock>,
}

/// Coerce a messy cell token into a number.
///
/// Strips every character that is not an ASCII digit, dot, or minus before
/// parsing, which tolerates currency and unit suffixes (`"₪45.00"` → 45.0).
/// The result is rounded to 3 decimals. Unparseable or empty input is
/// absent, not an error.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    Some((value * 1000.0).round() / 1000.0)
}

/// Parse the first whitespace-delimited token of a cell as a number
fn parse_cell_number(cell: &str) -> Option<f64> {
    parse_number(first_token(cell))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        other => Some(other.to_string()),
    }
}

fn cell(row: &[Option<String>], index: usize) -> Option<&str> {
    row.get(index).and_then(|c| c.as_deref())
}

/// Scan a cell grid into customer blocks.
///
/// The active block index is local parse state; it deliberately carries over
/// from the end of the first column triple into the second, matching the
/// sheet convention that the second column group continues the first.
#[must_use]
pub fn scan_grid(rows: &[Vec<Option<String>>]) -> OrderSheet {
    let mut sheet = OrderSheet::default();
    let mut current: Option<usize> = None;

    for (label_col, qty_col, price_col) in COLUMN_SETS {
        for row in rows {
            let label = cell(row, label_col);
            let qty = cell(row, qty_col);
            let price = cell(row, price_col);

            // A marker line opens (or resets) a customer block
            if let Some((name_part, phone_part)) =
                label.and_then(|text| text.split_once(PICKUP_MARKER))
            {
                let name = name_part.trim().to_string();
                let phone = phone_part.trim().to_string();
                let index = match sheet.blocks.iter().position(|b| b.name == name) {
                    Some(existing) => {
                        // A repeated marker for a seen name restarts that
                        // customer's block from scratch
                        let block = &mut sheet.blocks[existing];
                        block.phone = phone;
                        block.fee = None;
                        block.total = None;
                        block.lines.clear();
                        existing
                    }
                    None => {
                        sheet.blocks.push(CustomerBlock {
                            name,
                            phone,
                            fee: None,
                            total: None,
                            lines: Vec::new(),
                        });
                        sheet.blocks.len() - 1
                    }
                };
                current = Some(index);
                continue;
            }

            let Some(index) = current else { continue };
            let Some(label_text) = label else { continue };

            if label_text == FEE_LABEL {
                if let Some(price_text) = price {
                    sheet.blocks[index].fee = parse_cell_number(price_text);
                }
                continue;
            }

            if label_text == TOTAL_LABEL {
                if let Some(price_text) = price {
                    sheet.blocks[index].total = parse_cell_number(price_text);
                }
                continue;
            }

            if label_text != PRODUCT_HEADER {
                if let (Some(qty_text), Some(price_text)) = (qty, price) {
                    push_line(&mut sheet.blocks[index], label_text, qty_text, price_text);
                }
            }
        }
    }

    sheet
}

fn push_line(block: &mut CustomerBlock, label: &str, qty_text: &str, price_text: &str) {
    let (Some(quantity), Some(full_price)) =
        (parse_cell_number(qty_text), parse_cell_number(price_text))
    else {
        // Unparseable quantity or price suppresses the line, never the import
        return;
    };
    if quantity == 0.0 || full_price == 0.0 {
        return;
    }

    let measurement_type = if qty_text.contains(WEIGHT_UNIT) {
        MeasurementType::Weight
    } else {
        MeasurementType::Countable
    };
    let line = ProductLine {
        name: label.replace('"', ""),
        quantity,
        unit_price: full_price / quantity,
        measurement_type,
    };

    // A repeated product within one block replaces the earlier line
    if let Some(existing) = block.lines.iter_mut().find(|l| l.name == line.name) {
        *existing = line;
    } else {
        block.lines.push(line);
    }
}

/// Decode an XLSX workbook and scan its first worksheet
pub fn parse_workbook(bytes: &[u8]) -> Result<OrderSheet> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| AppError::Sheet(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Sheet("workbook has no worksheets".to_string()))?
        .map_err(|e| AppError::Sheet(e.to_string()))?;

    let rows: Vec<Vec<Option<String>>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(scan_grid(&rows))
}
