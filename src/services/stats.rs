// src/services/stats.rs

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    billing::{Invoice, InvoiceStatus},
    catalog::ProductWithVariants,
    clients::Client,
    dashboard::{ActivityEntry, DashboardStats, PaymentStats, TopClientEntry},
};

const TOP_CLIENTS_LIMIT: usize = 5;
const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Derives the dashboard summary from fully materialized collections.
///
/// Pure and infallible: missing client references group under "Unknown",
/// a missing `created_at` sorts as the Unix epoch, and the average guards
/// against an empty invoice set. Draft, sent and cancelled invoices count
/// towards the totals but fall into none of the payment buckets.
pub fn compute_dashboard_stats(
    clients: &[Client],
    invoices: &[Invoice],
    products: &[ProductWithVariants],
) -> DashboardStats {
    let total_invoices = invoices.len() as i64;

    let mut paid_invoices = 0i64;
    let mut pending_invoices = 0i64;
    let mut overdue_invoices = 0i64;
    let mut total_revenue = Decimal::ZERO;
    let mut invoiced_total = Decimal::ZERO;

    for invoice in invoices {
        invoiced_total += invoice.final_amount;
        match invoice.status {
            InvoiceStatus::Paid => {
                paid_invoices += 1;
                // Revenue is recognized on fully paid invoices only.
                total_revenue += invoice.final_amount;
            }
            InvoiceStatus::Pending => pending_invoices += 1,
            InvoiceStatus::Overdue => overdue_invoices += 1,
            InvoiceStatus::Draft | InvoiceStatus::Sent | InvoiceStatus::Cancelled => {}
        }
    }

    let average_invoice_value = if total_invoices == 0 {
        Decimal::ZERO
    } else {
        invoiced_total / Decimal::from(total_invoices)
    };

    let client_names: HashMap<Uuid, &str> = clients
        .iter()
        .map(|c| (c.id, c.company_name.as_str()))
        .collect();

    DashboardStats {
        total_clients: clients.len() as i64,
        total_invoices,
        total_products: products.len() as i64,
        paid_invoices,
        pending_invoices,
        overdue_invoices,
        total_revenue,
        average_invoice_value,
        top_clients: top_clients(invoices, &client_names),
        recent_activity: recent_activity(invoices, &client_names),
        payment_stats: PaymentStats {
            paid: paid_invoices,
            pending: pending_invoices,
            overdue: overdue_invoices,
        },
    }
}

/// Groups invoices by client in first-seen order, then sorts descending by
/// total. The sort is stable, so ties keep the grouping order.
fn top_clients(invoices: &[Invoice], client_names: &HashMap<Uuid, &str>) -> Vec<TopClientEntry> {
    let mut entries: Vec<TopClientEntry> = Vec::new();
    let mut slot_by_client: HashMap<Option<Uuid>, usize> = HashMap::new();

    for invoice in invoices {
        let slot = *slot_by_client.entry(invoice.client_id).or_insert_with(|| {
            entries.push(TopClientEntry {
                client_id: invoice.client_id,
                client_name: resolve_name(invoice.client_id, client_names),
                total: Decimal::ZERO,
                invoice_count: 0,
            });
            entries.len() - 1
        });
        entries[slot].total += invoice.final_amount;
        entries[slot].invoice_count += 1;
    }

    entries.sort_by(|a, b| b.total.cmp(&a.total));
    entries.truncate(TOP_CLIENTS_LIMIT);
    entries
}

/// The 5 most recently created invoices, newest first.
fn recent_activity(
    invoices: &[Invoice],
    client_names: &HashMap<Uuid, &str>,
) -> Vec<ActivityEntry> {
    let mut ordered: Vec<&Invoice> = invoices.iter().collect();
    ordered.sort_by_key(|i| Reverse(i.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)));

    ordered
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|invoice| ActivityEntry {
            invoice_id: invoice.id,
            invoice_number: invoice.invoice_number.clone(),
            client_name: resolve_name(invoice.client_id, client_names),
            final_amount: invoice.final_amount,
            status: invoice.status,
            created_at: invoice.created_at,
        })
        .collect()
}

fn resolve_name(client_id: Option<Uuid>, client_names: &HashMap<Uuid, &str>) -> String {
    client_id
        .and_then(|id| client_names.get(&id))
        .map(|name| name.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn client(name: &str) -> Client {
        Client {
            id: Uuid::new_v4(),
            company_name: name.to_string(),
            company_email: format!("{}@example.co.ke", name.to_lowercase().replace(' ', ".")),
            contact_person: None,
            phone: None,
            address: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn invoice(
        client_id: Option<Uuid>,
        status: InvoiceStatus,
        final_amount: Decimal,
        created_at: Option<DateTime<Utc>>,
    ) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            invoice_number: "INV-00001".to_string(),
            client_id,
            status,
            discount: None,
            vat_rate: None,
            subtotal: final_amount,
            vat_amount: dec!(0),
            final_amount,
            amount_paid: None,
            due_date: None,
            notes: None,
            created_at,
            updated_at: None,
        }
    }

    fn at(day: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap())
    }

    #[test]
    fn empty_collections_produce_the_zero_dashboard() {
        let stats = compute_dashboard_stats(&[], &[], &[]);
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.total_invoices, 0);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_revenue, dec!(0));
        assert_eq!(stats.average_invoice_value, dec!(0));
        assert!(stats.top_clients.is_empty());
        assert!(stats.recent_activity.is_empty());
    }

    #[test]
    fn revenue_counts_paid_invoices_only() {
        let stats = compute_dashboard_stats(
            &[],
            &[
                invoice(None, InvoiceStatus::Paid, dec!(500), at(1)),
                invoice(None, InvoiceStatus::Pending, dec!(1000), at(2)),
            ],
            &[],
        );
        assert_eq!(stats.total_revenue, dec!(500));
    }

    #[test]
    fn status_buckets_exclude_draft_sent_and_cancelled() {
        let stats = compute_dashboard_stats(
            &[],
            &[
                invoice(None, InvoiceStatus::Paid, dec!(100), at(1)),
                invoice(None, InvoiceStatus::Pending, dec!(100), at(2)),
                invoice(None, InvoiceStatus::Overdue, dec!(100), at(3)),
                invoice(None, InvoiceStatus::Draft, dec!(100), at(4)),
                invoice(None, InvoiceStatus::Sent, dec!(100), at(5)),
                invoice(None, InvoiceStatus::Cancelled, dec!(100), at(6)),
            ],
            &[],
        );
        assert_eq!(stats.paid_invoices, 1);
        assert_eq!(stats.pending_invoices, 1);
        assert_eq!(stats.overdue_invoices, 1);
        assert_eq!(stats.total_invoices, 6);
        assert!(
            stats.paid_invoices + stats.pending_invoices + stats.overdue_invoices
                <= stats.total_invoices
        );
    }

    #[test]
    fn payment_stats_mirror_the_bucket_counts() {
        let stats = compute_dashboard_stats(
            &[],
            &[
                invoice(None, InvoiceStatus::Paid, dec!(100), at(1)),
                invoice(None, InvoiceStatus::Overdue, dec!(100), at(2)),
            ],
            &[],
        );
        assert_eq!(stats.payment_stats.paid, stats.paid_invoices);
        assert_eq!(stats.payment_stats.pending, stats.pending_invoices);
        assert_eq!(stats.payment_stats.overdue, stats.overdue_invoices);
    }

    #[test]
    fn average_covers_all_statuses() {
        let stats = compute_dashboard_stats(
            &[],
            &[
                invoice(None, InvoiceStatus::Paid, dec!(300), at(1)),
                invoice(None, InvoiceStatus::Draft, dec!(100), at(2)),
            ],
            &[],
        );
        assert_eq!(stats.average_invoice_value, dec!(200));
    }

    #[test]
    fn top_clients_ranks_by_summed_total() {
        let a = client("Acacia Ltd");
        let b = client("Baobab Ltd");
        let invoices = vec![
            invoice(Some(a.id), InvoiceStatus::Paid, dec!(100), at(1)),
            invoice(Some(b.id), InvoiceStatus::Pending, dec!(300), at(2)),
            invoice(Some(a.id), InvoiceStatus::Sent, dec!(50), at(3)),
        ];
        let stats = compute_dashboard_stats(&[a.clone(), b.clone()], &invoices, &[]);

        assert_eq!(stats.top_clients.len(), 2);
        assert_eq!(stats.top_clients[0].client_id, Some(b.id));
        assert_eq!(stats.top_clients[0].total, dec!(300));
        assert_eq!(stats.top_clients[0].invoice_count, 1);
        assert_eq!(stats.top_clients[1].client_id, Some(a.id));
        assert_eq!(stats.top_clients[1].total, dec!(150));
        assert_eq!(stats.top_clients[1].invoice_count, 2);
    }

    #[test]
    fn top_clients_is_capped_at_five_and_sorted_descending() {
        let clients: Vec<Client> = (0..7).map(|i| client(&format!("Client {}", i))).collect();
        let invoices: Vec<Invoice> = clients
            .iter()
            .enumerate()
            .map(|(i, c)| {
                invoice(
                    Some(c.id),
                    InvoiceStatus::Paid,
                    Decimal::from((i as i64 + 1) * 100),
                    at(1),
                )
            })
            .collect();

        let stats = compute_dashboard_stats(&clients, &invoices, &[]);
        assert_eq!(stats.top_clients.len(), 5);
        for pair in stats.top_clients.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
        assert_eq!(stats.top_clients[0].total, dec!(700));
    }

    #[test]
    fn top_client_ties_keep_first_seen_order() {
        let a = client("First Seen");
        let b = client("Second Seen");
        let invoices = vec![
            invoice(Some(a.id), InvoiceStatus::Paid, dec!(200), at(1)),
            invoice(Some(b.id), InvoiceStatus::Paid, dec!(200), at(2)),
        ];
        let stats = compute_dashboard_stats(&[a.clone(), b], &invoices, &[]);
        assert_eq!(stats.top_clients[0].client_id, Some(a.id));
    }

    #[test]
    fn missing_client_reference_reads_unknown() {
        let orphan = Uuid::new_v4(); // no matching client record
        let invoices = vec![
            invoice(Some(orphan), InvoiceStatus::Paid, dec!(100), at(1)),
            invoice(None, InvoiceStatus::Paid, dec!(40), at(2)),
        ];
        let stats = compute_dashboard_stats(&[], &invoices, &[]);
        assert!(stats.top_clients.iter().all(|e| e.client_name == "Unknown"));
        // A dangling id and a null id are distinct groups.
        assert_eq!(stats.top_clients.len(), 2);
    }

    #[test]
    fn recent_activity_is_newest_first_and_capped() {
        let invoices: Vec<Invoice> = (1..=7)
            .map(|day| invoice(None, InvoiceStatus::Sent, dec!(10), at(day)))
            .collect();
        let stats = compute_dashboard_stats(&[], &invoices, &[]);

        assert_eq!(stats.recent_activity.len(), 5);
        assert_eq!(stats.recent_activity[0].created_at, at(7));
        assert_eq!(stats.recent_activity[4].created_at, at(3));
    }

    #[test]
    fn null_created_at_sorts_last_without_panicking() {
        let invoices = vec![
            invoice(None, InvoiceStatus::Sent, dec!(10), None),
            invoice(None, InvoiceStatus::Sent, dec!(20), at(5)),
        ];
        let stats = compute_dashboard_stats(&[], &invoices, &[]);
        assert_eq!(stats.recent_activity[0].created_at, at(5));
        assert_eq!(stats.recent_activity[1].created_at, None);
    }
}
