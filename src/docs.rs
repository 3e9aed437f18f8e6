// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Clients ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Products ---
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,

        // --- Quotations ---
        handlers::quotations::create_quotation,
        handlers::quotations::list_quotations,
        handlers::quotations::get_quotation,
        handlers::quotations::update_quotation,
        handlers::quotations::delete_quotation,
        handlers::quotations::convert_quotation,

        // --- Invoices ---
        handlers::invoices::create_invoice,
        handlers::invoices::list_invoices,
        handlers::invoices::get_invoice,
        handlers::invoices::update_invoice,
        handlers::invoices::set_invoice_status,
        handlers::invoices::record_payment,
        handlers::invoices::delete_invoice,

        // --- Dashboard ---
        handlers::dashboard::get_stats,

        // --- Documents ---
        handlers::documents::invoice_pdf,
        handlers::documents::quotation_pdf,

        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,
    ),
    components(
        schemas(
            // --- Clients ---
            models::clients::Client,
            handlers::clients::ClientPayload,

            // --- Catalog ---
            models::catalog::Product,
            models::catalog::ProductVariant,
            models::catalog::ProductWithVariants,
            handlers::catalog::ProductPayload,
            handlers::catalog::VariantPayload,

            // --- Billing ---
            models::billing::InvoiceStatus,
            models::billing::QuotationStatus,
            models::billing::Invoice,
            models::billing::Quotation,
            models::billing::DocumentItem,
            models::billing::ItemInput,
            models::billing::DocumentTotals,
            models::billing::InvoiceDetail,
            models::billing::QuotationDetail,
            handlers::quotations::QuotationPayload,
            handlers::invoices::InvoicePayload,
            handlers::invoices::StatusPayload,
            handlers::invoices::PaymentPayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::TopClientEntry,
            models::dashboard::ActivityEntry,
            models::dashboard::PaymentStats,

            // --- Settings ---
            models::settings::CompanySettings,
            handlers::settings::UpdateSettingsPayload,
        )
    ),
    tags(
        (name = "Clients", description = "Client directory"),
        (name = "Products", description = "Product catalog and variants"),
        (name = "Quotations", description = "Quotation lifecycle"),
        (name = "Invoices", description = "Invoice lifecycle and payments"),
        (name = "Dashboard", description = "Summary statistics"),
        (name = "Documents", description = "PDF export"),
        (name = "Settings", description = "Company profile")
    )
)]
pub struct ApiDoc;
