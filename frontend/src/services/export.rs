//! Spreadsheet export: writes an [`ExportSheet`] to xlsx bytes and hands them to the browser
//! as a download.

use gloo::timers::callback::Timeout;
use rust_xlsxwriter::{Workbook, XlsxError};
use shared::ExportSheet;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// How long the object URL outlives the click that starts the download
const REVOKE_DELAY_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// A single populated cell, zero-based
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
}

/// Cell layout of the sheet: headers on row 0, ticket rows below.
/// Blank Price and Quantity (the "Total" row) produce no cell at all.
pub fn sheet_cells(sheet: &ExportSheet) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut push = |row: u32, col: u16, value: CellValue| cells.push(Cell { row, col, value });

    for (col, header) in sheet.headers().iter().enumerate() {
        push(0, col as u16, CellValue::Text(header.to_string()));
    }

    for (index, row) in sheet.rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        push(row_num, 0, CellValue::Text(row.name.clone()));
        if let Some(price) = row.price {
            push(row_num, 1, CellValue::Number(price));
        }
        if let Some(quantity) = row.quantity {
            push(row_num, 2, CellValue::Number(f64::from(quantity)));
        }
        push(row_num, 3, CellValue::Text(row.total.clone()));
    }

    cells
}

fn populate(workbook: &mut Workbook, sheet: &ExportSheet) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.sheet_name)?;

    for cell in sheet_cells(sheet) {
        match &cell.value {
            CellValue::Text(text) => worksheet.write_string(cell.row, cell.col, text)?,
            CellValue::Number(number) => worksheet.write_number(cell.row, cell.col, *number)?,
        };
    }

    Ok(())
}

/// Serialize the sheet to xlsx bytes
pub fn build_workbook(sheet: &ExportSheet) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    populate(&mut workbook, sheet)?;
    workbook.save_to_buffer()
}

/// Build the workbook and trigger a browser download named `file_name`
pub fn download_sheet(sheet: &ExportSheet, file_name: &str) -> Result<(), String> {
    let bytes = build_workbook(sheet).map_err(|e| format!("Failed to build workbook: {}", e))?;

    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&array);

    let options = BlobPropertyBag::new();
    options.set_type(XLSX_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create download URL: {:?}", e))?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "No document available".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create link: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Created element is not an anchor".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // Revoking in the same tick can cancel the download in some browsers
    Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            gloo::console::warn!(format!("Failed to release download URL: {:?}", e));
        }
    })
    .forget();

    Ok(())
}
