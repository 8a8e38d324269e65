//! # Invoice PDF Rendering
//!
//! Renders a finalized invoice onto a single A4 page.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SUNAR JEWELLERS                                     Invoice: GJ-1001   │
//! │  Gold & Ornament Merchants                           Date: 2026-08-25   │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  Customer: ...        Phone: ...        Address: ...                    │
//! │  Rates: 22K 1340.00 / Tola    24K 1430.00 / Tola                        │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  SN  Particulars     Net Wt  Wastage  Total Wt  Stones  Wages  Total    │
//! │   1  Gold Ring (22K)  42.00     3.00     45.00    0.00  85.00  688.00   │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │                                      Sub Total            688.00        │
//! │                                      Old Gold (less)       38.00        │
//! │                                      GST (10%)              65.00       │
//! │                                      Discount (less)       12.50        │
//! │                                      Grand Total          702.50        │
//! │                                      Advance Paid         100.00        │
//! │                                      Balance Due          602.50        │
//! │                                                                         │
//! │  Terms: goods once sold ...                  SOLD BY: ______            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The renderer reads the STORED derived values; it never reprices. What
//! was saved is what prints.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point};
use tracing::info;

use sunar_core::{format_amount, Invoice};

use crate::error::{AppError, AppResult};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 14.0;
const RIGHT: f32 = PAGE_W - MARGIN;
const ROW_STEP: f32 = 6.5;

// Item table column x positions (left edges; amounts right-aligned by eye)
const COL_SN: f32 = MARGIN;
const COL_DESC: f32 = MARGIN + 10.0;
const COL_NET: f32 = 92.0;
const COL_WASTAGE: f32 = 110.0;
const COL_TOTAL_WT: f32 = 128.0;
const COL_STONES: f32 = 148.0;
const COL_WAGES: f32 = 164.0;
const COL_TOTAL: f32 = 180.0;

/// Renders the invoice as a PDF at the given path.
///
/// ## Preconditions
/// Call only after the invoice has been saved; a failed save must never
/// produce a document. The caller (the finalize pipeline) enforces the
/// order.
pub fn render_invoice(invoice: &Invoice, path: &Path) -> AppResult<()> {
    let title = format!("Invoice {}", invoice.invoice_number);
    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Render(e.to_string()))?;

    let mut y = PAGE_H - 18.0;

    // Header branding
    text(&layer, &font_bold, "SUNAR JEWELLERS", 16.0, MARGIN, y);
    text(
        &layer,
        &font,
        &format!("Invoice: {}", invoice.invoice_number),
        11.0,
        150.0,
        y,
    );
    y -= 6.0;
    text(&layer, &font, "Gold & Ornament Merchants", 9.0, MARGIN, y);
    text(
        &layer,
        &font,
        &format!("Date: {}", invoice.date),
        10.0,
        150.0,
        y,
    );
    y -= 5.0;
    rule(&layer, MARGIN, RIGHT, y);
    y -= 7.0;

    // Customer block (snapshot as saved)
    text(
        &layer,
        &font,
        &format!("Customer: {}", invoice.customer.name),
        10.0,
        MARGIN,
        y,
    );
    text(
        &layer,
        &font,
        &format!("Phone: {}", invoice.customer.phone),
        10.0,
        110.0,
        y,
    );
    y -= 5.5;
    text(
        &layer,
        &font,
        &format!("Address: {}", invoice.customer.address),
        10.0,
        MARGIN,
        y,
    );
    y -= 6.5;

    // Rate strip (the frozen snapshot this invoice was priced at)
    text(
        &layer,
        &font,
        &format!(
            "Rates: 22K {} / Tola    24K {} / Tola",
            format_amount(invoice.rates.rate_22k),
            format_amount(invoice.rates.rate_24k)
        ),
        9.0,
        MARGIN,
        y,
    );
    y -= 4.0;
    rule(&layer, MARGIN, RIGHT, y);
    y -= 6.5;

    // Item table header
    text(&layer, &font_bold, "SN", 9.0, COL_SN, y);
    text(&layer, &font_bold, "Particulars", 9.0, COL_DESC, y);
    text(&layer, &font_bold, "Net Wt", 9.0, COL_NET, y);
    text(&layer, &font_bold, "Wastage", 9.0, COL_WASTAGE, y);
    text(&layer, &font_bold, "Total Wt", 9.0, COL_TOTAL_WT, y);
    text(&layer, &font_bold, "Stones", 9.0, COL_STONES, y);
    text(&layer, &font_bold, "Wages", 9.0, COL_WAGES, y);
    text(&layer, &font_bold, "Total", 9.0, COL_TOTAL, y);
    y -= 2.5;
    rule(&layer, MARGIN, RIGHT, y);
    y -= 5.5;

    // Item rows: only rows with a description print
    for (sn, item) in invoice.printable_items().enumerate() {
        let purity = item.purity.unwrap_or_default();
        let unit = item.weight_unit.unwrap_or_default();

        text(&layer, &font, &format!("{}", sn + 1), 9.0, COL_SN, y);
        text(
            &layer,
            &font,
            &format!("{} ({})", item.description, purity),
            9.0,
            COL_DESC,
            y,
        );
        text(
            &layer,
            &font,
            &format!("{} {}", format_amount(item.net_weight), unit),
            9.0,
            COL_NET,
            y,
        );
        text(
            &layer,
            &font,
            &format_amount(item.wastage),
            9.0,
            COL_WASTAGE,
            y,
        );
        text(
            &layer,
            &font,
            &format!("{} {}", format_amount(item.display_total_weight), unit),
            9.0,
            COL_TOTAL_WT,
            y,
        );
        text(
            &layer,
            &font,
            &format_amount(item.stone_cost),
            9.0,
            COL_STONES,
            y,
        );
        text(&layer, &font, &format_amount(item.wages), 9.0, COL_WAGES, y);
        text(
            &layer,
            &font,
            &format_amount(item.line_total),
            9.0,
            COL_TOTAL,
            y,
        );
        y -= ROW_STEP;
    }

    y -= 1.0;
    rule(&layer, MARGIN, RIGHT, y);
    y -= 7.0;

    // Totals block, in the order the money flows
    for line in totals_lines(invoice) {
        let line_font = if line.bold { &font_bold } else { &font };
        y = totals_row(&layer, line_font, &line.label, line.amount, y);
    }

    // Footer: terms and salesperson
    let footer_y = 22.0;
    text(
        &layer,
        &font,
        "Terms: Goods once sold will only be exchanged, not refunded.",
        8.0,
        MARGIN,
        footer_y,
    );
    let sold_by = if invoice.sold_by.is_empty() {
        "__________".to_string()
    } else {
        invoice.sold_by.clone()
    };
    text(
        &layer,
        &font,
        &format!("SOLD BY: {}", sold_by),
        9.0,
        150.0,
        footer_y,
    );

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| AppError::Render(e.to_string()))?;

    info!(
        invoice_number = %invoice.invoice_number,
        path = %path.display(),
        "PDF written"
    );
    Ok(())
}

/// One line of the totals block.
#[derive(Debug, Clone, PartialEq)]
struct TotalLine {
    label: String,
    amount: f64,
    bold: bool,
}

impl TotalLine {
    fn new(label: impl Into<String>, amount: f64, bold: bool) -> Self {
        TotalLine {
            label: label.into(),
            amount,
            bold,
        }
    }
}

/// Selects the totals rows for the document, in the order the money flows.
///
/// The adjustment rows print only for positive amounts; a negative or zero
/// adjustment still flows through the totals but gets no row of its own.
/// The GST row always prints, percent included, even at 0%.
fn totals_lines(invoice: &Invoice) -> Vec<TotalLine> {
    let totals = invoice.totals();
    let adj = &invoice.adjustments;

    let mut lines = vec![TotalLine::new("Sub Total", totals.sub_total, false)];
    if adj.old_gold_amount > 0.0 {
        lines.push(TotalLine::new("Old Gold (less)", adj.old_gold_amount, false));
    }
    lines.push(TotalLine::new(
        format!("GST ({}%)", adj.gst_percent),
        totals.gst_amount,
        false,
    ));
    if adj.discount_amount > 0.0 {
        lines.push(TotalLine::new("Discount (less)", adj.discount_amount, false));
    }
    lines.push(TotalLine::new("Grand Total", totals.grand_total, true));
    if adj.advance_payment > 0.0 {
        lines.push(TotalLine::new("Advance Paid", adj.advance_payment, false));
        lines.push(TotalLine::new("Balance Due", totals.balance_due, true));
    }
    lines
}

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    s: &str,
    size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(s, size, Mm(x), Mm(y), font);
}

fn rule(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32) {
    layer.add_line(printpdf::Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn totals_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    label: &str,
    amount: f64,
    y: f32,
) -> f32 {
    text(layer, font, label, 10.0, 128.0, y);
    text(layer, font, &format_amount(amount), 10.0, COL_TOTAL, y);
    y - 5.5
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sunar_core::{Customer, LineItem, RateCard};

    fn sample_invoice() -> Invoice {
        let mut invoice = Invoice::draft("GJ-1001", RateCard::new(1340.0, 1430.0));
        invoice.customer = Customer {
            name: "Ali Khan".to_string(),
            phone: "0771234567".to_string(),
            address: "Main Bazaar".to_string(),
        };
        invoice.items = vec![LineItem {
            description: "Gold Ring".to_string(),
            net_weight: 42.0,
            wastage: 3.0,
            wages: 85.0,
            ..LineItem::blank()
        }];
        invoice.adjustments.gst_percent = 10.0;
        invoice.adjustments.advance_payment = 100.0;
        invoice.recompute();
        invoice
    }

    fn labels(invoice: &Invoice) -> Vec<String> {
        totals_lines(invoice)
            .into_iter()
            .map(|line| line.label)
            .collect()
    }

    #[test]
    fn test_gst_row_always_prints() {
        // Even at 0% the document shows the GST row with its percent
        let mut invoice = Invoice::draft("GJ-1001", RateCard::default());
        invoice.items[0].description = "Ring".to_string();
        invoice.recompute();

        assert!(labels(&invoice).contains(&"GST (0%)".to_string()));

        invoice.adjustments.gst_percent = 13.0;
        invoice.recompute();
        assert!(labels(&invoice).contains(&"GST (13%)".to_string()));
    }

    #[test]
    fn test_negative_advance_hides_paid_rows() {
        // A negative advance still flows through balance_due but the
        // Paid/Balance pair only prints for a positive payment
        let mut invoice = sample_invoice();
        invoice.adjustments.advance_payment = -100.0;
        invoice.recompute();

        let labels = labels(&invoice);
        assert!(!labels.contains(&"Advance Paid".to_string()));
        assert!(!labels.contains(&"Balance Due".to_string()));
        assert!((invoice.balance_due - (invoice.grand_total + 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_adjustments_get_no_rows() {
        let mut invoice = sample_invoice();
        invoice.adjustments.old_gold_amount = -50.0;
        invoice.adjustments.discount_amount = -25.0;
        invoice.recompute();

        let labels = labels(&invoice);
        assert!(!labels.contains(&"Old Gold (less)".to_string()));
        assert!(!labels.contains(&"Discount (less)".to_string()));
    }

    #[test]
    fn test_positive_adjustments_print_in_money_order() {
        let mut invoice = sample_invoice();
        invoice.adjustments.old_gold_amount = 200.0;
        invoice.adjustments.discount_amount = 50.0;
        invoice.adjustments.advance_payment = 300.0;
        invoice.adjustments.gst_percent = 10.0;
        invoice.recompute();

        let expected = [
            "Sub Total",
            "Old Gold (less)",
            "GST (10%)",
            "Discount (less)",
            "Grand Total",
            "Advance Paid",
            "Balance Due",
        ];
        assert_eq!(labels(&invoice), expected);
    }

    #[test]
    fn test_render_writes_a_pdf_file() {
        let path = std::env::temp_dir().join(format!(
            "sunar-pdf-test-{}.pdf",
            std::process::id()
        ));

        render_invoice(&sample_invoice(), &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);

        std::fs::remove_file(&path).ok();
    }
}
