// src/services/document_service.rs

use genpdf::{elements, style, Element, Margins};
use image::Luma;
use qrcode::QrCode;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, money::format_kes},
    db::{BillingRepository, ClientRepository, SettingsRepository},
    models::{billing::DocumentItem, clients::Client, settings::CompanySettings},
};

// Renders quotations and invoices to PDF in-process. Layout: company
// header from settings, document meta, client block, items table, totals,
// optional payment QR code, address footer.
#[derive(Clone)]
pub struct DocumentService {
    billing: BillingRepository,
    clients: ClientRepository,
    settings: SettingsRepository,
}

// Everything the renderer needs, already fetched.
struct PrintData {
    title: &'static str,
    number: String,
    date_line: Option<String>,
    deadline_line: Option<String>,
    client: Option<Client>,
    items: Vec<DocumentItem>,
    subtotal: Decimal,
    discount: Option<Decimal>,
    vat_rate: Option<Decimal>,
    vat_amount: Decimal,
    final_amount: Decimal,
}

impl DocumentService {
    pub fn new(
        billing: BillingRepository,
        clients: ClientRepository,
        settings: SettingsRepository,
    ) -> Self {
        Self {
            billing,
            clients,
            settings,
        }
    }

    pub async fn generate_invoice_pdf(&self, invoice_id: Uuid) -> Result<Vec<u8>, AppError> {
        let invoice = self
            .billing
            .find_invoice(invoice_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice".to_string()))?;
        let items = self.billing.list_invoice_items(invoice_id).await?;
        let client = match invoice.client_id {
            Some(id) => self.clients.find_by_id(id).await?,
            None => None,
        };
        let settings = self.settings.get_settings().await?;

        let data = PrintData {
            title: "INVOICE",
            number: invoice.invoice_number,
            date_line: invoice
                .created_at
                .map(|d| format!("Date: {}", d.format("%d/%m/%Y"))),
            deadline_line: invoice
                .due_date
                .map(|d| format!("Due date: {}", d.format("%d/%m/%Y"))),
            client,
            items,
            subtotal: invoice.subtotal,
            discount: invoice.discount,
            vat_rate: invoice.vat_rate,
            vat_amount: invoice.vat_amount,
            final_amount: invoice.final_amount,
        };

        render_document(&settings, data)
    }

    pub async fn generate_quotation_pdf(&self, quotation_id: Uuid) -> Result<Vec<u8>, AppError> {
        let quotation = self
            .billing
            .find_quotation(quotation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quotation".to_string()))?;
        let items = self.billing.list_quotation_items(quotation_id).await?;
        let client = match quotation.client_id {
            Some(id) => self.clients.find_by_id(id).await?,
            None => None,
        };
        let settings = self.settings.get_settings().await?;

        let data = PrintData {
            title: "QUOTATION",
            number: quotation.quotation_number,
            date_line: quotation
                .created_at
                .map(|d| format!("Date: {}", d.format("%d/%m/%Y"))),
            deadline_line: quotation
                .valid_until
                .map(|d| format!("Valid until: {}", d.format("%d/%m/%Y"))),
            client,
            items,
            subtotal: quotation.subtotal,
            discount: quotation.discount,
            vat_rate: quotation.vat_rate,
            vat_amount: quotation.vat_amount,
            final_amount: quotation.final_amount,
        };

        render_document(&settings, data)
    }
}

fn render_document(settings: &CompanySettings, data: PrintData) -> Result<Vec<u8>, AppError> {
    // Fonts are loaded from the 'fonts/' directory next to the binary.
    let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
        .map_err(|_| AppError::FontNotFound("Roboto not found in ./fonts".to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("{} {}", data.title, data.number));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(Margins::all(10));
    doc.set_page_decorator(decorator);

    // --- COMPANY HEADER ---
    doc.push(
        elements::Paragraph::new(settings.company_name.clone())
            .styled(style::Style::new().bold().with_font_size(18)),
    );

    if let Some(pin) = &settings.tax_pin {
        doc.push(
            elements::Paragraph::new(format!("PIN: {}", pin))
                .styled(style::Style::new().with_font_size(10)),
        );
    }

    doc.push(elements::Break::new(1.5));

    doc.push(
        elements::Paragraph::new(format!("{} {}", data.title, data.number))
            .styled(style::Style::new().bold().with_font_size(14)),
    );

    if let Some(line) = &data.date_line {
        doc.push(elements::Paragraph::new(line.clone()));
    }
    if let Some(line) = &data.deadline_line {
        doc.push(elements::Paragraph::new(line.clone()));
    }

    // --- CLIENT BLOCK ---
    match &data.client {
        Some(client) => {
            doc.push(elements::Paragraph::new(format!(
                "Billed to: {}",
                client.company_name
            )));
            if let Some(contact) = &client.contact_person {
                doc.push(elements::Paragraph::new(format!("Attn: {}", contact)));
            }
            doc.push(elements::Paragraph::new(client.company_email.clone()));
            if let Some(address) = &client.address {
                doc.push(elements::Paragraph::new(address.clone()));
            }
        }
        None => {
            doc.push(elements::Paragraph::new("Billed to: Walk-in customer"));
        }
    }

    doc.push(elements::Break::new(2));

    // --- ITEMS TABLE ---
    // Column weights: Description (4), Qty (1), Unit price (2), Total (2)
    let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Description").styled(style_bold))
        .element(elements::Paragraph::new("Qty").styled(style_bold))
        .element(elements::Paragraph::new("Unit price").styled(style_bold))
        .element(elements::Paragraph::new("Total").styled(style_bold))
        .push()
        .expect("Table error");

    for item in &data.items {
        table
            .row()
            .element(elements::Paragraph::new(item.description.clone()))
            .element(elements::Paragraph::new(format!("{}", item.quantity.normalize())))
            .element(elements::Paragraph::new(format_kes(item.unit_price)))
            .element(elements::Paragraph::new(format_kes(item.line_total)))
            .push()
            .expect("Table row error");
    }

    doc.push(table);
    doc.push(elements::Break::new(1.5));

    // --- TOTALS ---
    let mut totals_lines = vec![format!("Subtotal: {}", format_kes(data.subtotal))];
    if let Some(discount) = data.discount {
        if discount > Decimal::ZERO {
            totals_lines.push(format!("Discount: -{}", format_kes(discount)));
        }
    }
    let vat_rate = data.vat_rate.unwrap_or(Decimal::ZERO);
    totals_lines.push(format!(
        "VAT ({}%): {}",
        vat_rate.normalize(),
        format_kes(data.vat_amount)
    ));

    for line in totals_lines {
        let mut paragraph = elements::Paragraph::new(line);
        paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(paragraph);
    }

    let mut total_paragraph =
        elements::Paragraph::new(format!("TOTAL DUE: {}", format_kes(data.final_amount)));
    total_paragraph.set_alignment(genpdf::Alignment::Right);
    doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

    doc.push(elements::Break::new(2));

    // --- PAYMENT (QR CODE) ---
    if let Some(account) = &settings.payment_account {
        doc.push(
            elements::Paragraph::new("PAYMENT DETAILS")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Paragraph::new(account.clone()));
        doc.push(elements::Break::new(1));

        // Plain QR of the payment line; scanning apps show it as text.
        let code = QrCode::new(account.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);
    }

    // --- FOOTER ---
    if let Some(address) = &settings.address {
        doc.push(elements::Break::new(2));
        doc.push(
            elements::Paragraph::new(address.clone())
                .styled(style::Style::new().italic().with_font_size(8)),
        );
    }

    // Render into memory.
    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    Ok(buffer)
}
