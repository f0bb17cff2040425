//! Quote data → placeholder values → populated HTML.

use std::collections::BTreeMap;

use jiff::civil::Date;

use preventivo_core::format::{
    format_italian_date, format_percentage, or_na, or_zero, validity_date,
};
use preventivo_core::models::account::Account;
use preventivo_core::models::client::ClientInfo;
use preventivo_core::models::project::Project;
use preventivo_core::models::quote::ResolvedQuote;
use preventivo_core::models::supplier::Supplier;
use preventivo_core::models::task::Task;

use crate::styles::{HIGHLIGHT_CLASS, inject_print_safety};
use crate::template::Template;

/// Every placeholder a template may declare.
pub const PLACEHOLDERS: &[&str] = &[
    "fornitoreNome",
    "fornitoreIndirizzo",
    "fornitoreComune",
    "fornitorePaese",
    "fornitorePiva",
    "fornitoreIban",
    "fornitoreMail",
    "fornitoreSitoWeb",
    "footer-fornitoreNome",
    "footer-fornitoreIndirizzo",
    "footer-fornitoreComune",
    "footer-fornitorePaese",
    "footer-fornitorePiva",
    "footer-fornitoreIban",
    "footer-fornitoreMail",
    "footer-fornitoreSitoWeb",
    "clienteNome",
    "clienteIndirizzo",
    "clienteComune",
    "clientePaese",
    "clientePiva",
    "progettoTitolo",
    "progettoOggetto",
    "costoSviluppo",
    "costoRicorrente",
    "costoTotale",
    "migliorPrezzo",
    "scontistica",
    "tempiConsegna",
    "condizioniPagamento",
    "lavorazioniCorpo",
    "lavorazioniSubtotale",
    "sottoscrizioniCorpo",
    "sottoscrizioniSubtotale",
];

/// Substring of the payment terms replaced by the deposit clause.
pub const DEPOSIT_SENTINEL: &str = "__anticipo_placeholder__";

const ISSUE_ANCHOR: &str = "data di emissione";
const VALIDITY_ANCHOR: &str = "valido fino al";

/// Populate `template` with `quote`, dated `issue_date`, ready to print.
pub fn populate(template: &Template, quote: &ResolvedQuote, issue_date: Date) -> String {
    inject_print_safety(&fill(template, quote, issue_date))
}

/// The document before print-safety injection.
///
/// Writes the issue and validity dates after their label anchors in the
/// template text (skipped when an anchor is missing), then substitutes every
/// placeholder.
pub fn fill(template: &Template, quote: &ResolvedQuote, issue_date: Date) -> String {
    let dated = insert_date(template, ISSUE_ANCHOR, issue_date);
    let dated = insert_date(&dated, VALIDITY_ANCHOR, validity_date(issue_date));
    dated.render(&placeholder_values(quote))
}

/// Value of every placeholder in [`PLACEHOLDERS`] for this quote.
pub fn placeholder_values(quote: &ResolvedQuote) -> BTreeMap<&'static str, String> {
    let mut values = BTreeMap::new();

    supplier_values(&mut values, &quote.supplier);
    client_values(&mut values, &quote.client);
    project_values(&mut values, &quote.project);

    values.insert("lavorazioniCorpo", task_rows(&quote.tasks));
    values.insert(
        "lavorazioniSubtotale",
        format!(
            r#"<p class="text-base px-4">SUBTOTALE:<span class="text-2xl font-semibold"> € {}</span></p>"#,
            or_zero(quote.project.gross.as_deref())
        ),
    );
    values.insert("sottoscrizioniCorpo", account_rows(&quote.accounts));
    values.insert(
        "sottoscrizioniSubtotale",
        format!(
            r#"<p class="text-base px-4">SUBTOTALE:<span class="text-2xl font-semibold">  € {}</span></p>"#,
            or_zero(quote.project.annual_costs.as_deref())
        ),
    );

    values
}

fn supplier_values(values: &mut BTreeMap<&'static str, String>, s: &Supplier) {
    let name = or_na(s.name.as_deref()).to_string();
    let address = format!(
        "{} {}",
        or_na(s.address.as_deref()),
        s.house_number.as_deref().unwrap_or("")
    );
    let municipality = format!(
        "{} - {} ({})",
        or_na(s.postal_code.as_deref()),
        or_na(s.municipality.as_deref()),
        or_na(s.province.as_deref())
    );
    let country = or_na(s.country.as_deref()).to_string();
    let tax_id = or_na(s.tax_id.as_deref()).to_string();
    let iban = or_na(s.iban.as_deref()).to_string();
    let email = or_na(s.email.as_deref()).to_string();
    let website = or_na(s.website.as_deref()).to_string();

    // Header and footer carry the same details under different names.
    for (header, footer, value) in [
        ("fornitoreNome", "footer-fornitoreNome", name),
        ("fornitoreIndirizzo", "footer-fornitoreIndirizzo", address),
        ("fornitoreComune", "footer-fornitoreComune", municipality),
        ("fornitorePaese", "footer-fornitorePaese", country),
        ("fornitorePiva", "footer-fornitorePiva", tax_id),
        ("fornitoreIban", "footer-fornitoreIban", iban),
        ("fornitoreMail", "footer-fornitoreMail", email),
        ("fornitoreSitoWeb", "footer-fornitoreSitoWeb", website),
    ] {
        values.insert(header, value.clone());
        values.insert(footer, value);
    }
}

fn client_values(values: &mut BTreeMap<&'static str, String>, c: &ClientInfo) {
    values.insert("clienteNome", or_na(c.name.as_deref()).to_string());
    values.insert(
        "clienteIndirizzo",
        format!(
            "{} {}",
            or_na(c.address.as_deref()),
            or_na(c.house_number.as_deref())
        ),
    );
    values.insert(
        "clienteComune",
        format!(
            "{} {} ({})",
            or_na(c.postal_code.as_deref()),
            or_na(c.municipality.as_deref()),
            or_na(c.province.as_deref())
        ),
    );
    values.insert("clientePaese", or_na(c.country.as_deref()).to_string());
    values.insert("clientePiva", or_na(c.tax_id.as_deref()).to_string());
}

fn project_values(values: &mut BTreeMap<&'static str, String>, p: &Project) {
    values.insert("progettoTitolo", or_na(p.title.as_deref()).to_string());
    values.insert("progettoOggetto", or_na(p.subject.as_deref()).to_string());
    values.insert("costoSviluppo", or_zero(p.gross.as_deref()).to_string());
    values.insert("costoRicorrente", or_zero(p.annual_costs.as_deref()).to_string());
    values.insert("costoTotale", or_zero(p.gross_plus_costs.as_deref()).to_string());
    values.insert("migliorPrezzo", or_zero(p.best_price.as_deref()).to_string());
    values.insert("scontistica", or_zero(p.discount.as_deref()).to_string());
    values.insert(
        "tempiConsegna",
        format!(
            r#"<span class="font-medium">Tempi di consegna:</span> {}"#,
            or_na(p.delivery_time.as_deref())
        ),
    );
    values.insert("condizioniPagamento", payment_terms(p));
}

/// Labelled payment terms with the deposit clause spliced in at
/// [`DEPOSIT_SENTINEL`].
pub fn payment_terms(project: &Project) -> String {
    let deposit = format!(
        "<span>{} (€ {})</span>",
        format_percentage(or_na(project.deposit_percent.as_deref())),
        or_na(project.deposit.as_deref())
    );
    let terms = or_na(project.payment_terms.as_deref()).replace(DEPOSIT_SENTINEL, &deposit);
    format!(r#"<span class="font-medium">Condizioni di pagamento:</span> {terms}"#)
}

/// Class attribute value for the row at `index`: highlighted on even rows.
fn row_class(index: usize) -> &'static str {
    if index % 2 == 0 { HIGHLIGHT_CLASS } else { "" }
}

/// One row per task, or a single "no items" row spanning both columns.
pub fn task_rows(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return empty_row(2, "Nessuna lavorazione disponibile");
    }

    tasks
        .iter()
        .enumerate()
        .map(|(index, t)| {
            format!(
                r#"
          <tr class="{class}">
            <td class="px-4 py-2 text-sm">
              <div class="text-base font-bold">{label}</div>
              <div class="text-sm">{description}</div>
            </td>
            <td class="px-4 py-2 text-lg text-sm font-semibold">€ {gross}</td>
          </tr>
        "#,
                class = row_class(index),
                label = or_na(t.label.as_deref()),
                description = t.description.as_deref().unwrap_or(""),
                gross = or_na(t.gross.as_deref()),
            )
        })
        .collect()
}

/// One row per account, or a single "no items" row spanning all four columns.
pub fn account_rows(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return empty_row(4, "Nessuna sottoscrizione disponibile");
    }

    accounts
        .iter()
        .enumerate()
        .map(|(index, a)| {
            format!(
                r#"
          <tr class="{class}">
            <td class="px-4 py-2 text-sm font-bold">{service}</td>
            <td class="px-4 py-2 text-xs uppercase">{category}</td>
            <td class="px-4 py-2 text-sm">{description}</td>
            <td class="px-4 py-2 text-lg text-sm font-semibold">€ {amount}</td>
          </tr>
        "#,
                class = row_class(index),
                service = or_na(a.service.as_deref()),
                category = or_na(a.category.as_deref()),
                description = or_na(a.description.as_deref()),
                amount = or_na(a.annual_amount.as_deref()),
            )
        })
        .collect()
}

fn empty_row(colspan: u8, message: &str) -> String {
    format!("<tr><td colspan='{colspan}' class='px-4 py-2 text-sm'>{message}</td></tr>")
}

/// Write `date` after the first `<anchor></p>` of the template text.
fn insert_date(template: &Template, anchor: &str, date: Date) -> Template {
    let target = format!("{anchor}</p>");
    let replacement = format!(
        r#"{anchor}: <span class="font-semibold">{}</span></p>"#,
        format_italian_date(date)
    );
    template
        .replace_literal_once(&target, &replacement)
        .unwrap_or_else(|| {
            tracing::debug!(anchor, "date anchor not found in template");
            template.clone()
        })
}
