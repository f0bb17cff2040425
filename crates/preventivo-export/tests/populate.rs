use jiff::civil::date;

use preventivo_core::models::account::Account;
use preventivo_core::models::project::Project;
use preventivo_core::models::quote::ResolvedQuote;
use preventivo_core::models::supplier::Supplier;
use preventivo_core::models::task::Task;
use preventivo_export::populate::{
    PLACEHOLDERS, account_rows, fill, payment_terms, placeholder_values, populate, task_rows,
};
use preventivo_export::styles::inject_print_safety;
use preventivo_export::template::Template;

fn task(label: &str, gross: &str) -> Task {
    Task {
        label: Some(label.to_string()),
        description: Some(format!("{label} description")),
        gross: Some(gross.to_string()),
    }
}

fn account(service: &str) -> Account {
    Account {
        service: Some(service.to_string()),
        category: Some("hosting".to_string()),
        description: None,
        annual_amount: Some("120".to_string()),
    }
}

fn casawa() -> ResolvedQuote {
    ResolvedQuote {
        domain_key: "casawa".to_string(),
        project: Project {
            id: "recP".to_string(),
            domain_key: Some("casawa".to_string()),
            title: Some("Sito Casawa".to_string()),
            gross: Some("2400".to_string()),
            payment_terms: Some("Anticipo del __anticipo_placeholder__, saldo alla consegna".to_string()),
            deposit_percent: Some("0.3".to_string()),
            deposit: Some("720".to_string()),
            ..Default::default()
        },
        tasks: vec![task("Design", "900"), task("Sviluppo", "1500")],
        ..Default::default()
    }
}

const TABLES: &str = "<html><head></head><body><div id=\"container\">\
<table id=\"tasks\">{{lavorazioniCorpo}}</table>{{lavorazioniSubtotale}}\
<table id=\"accounts\">{{sottoscrizioniCorpo}}</table>{{sottoscrizioniSubtotale}}\
</div></body></html>";

#[test]
fn every_placeholder_has_a_value() {
    let values = placeholder_values(&ResolvedQuote::default());
    for name in PLACEHOLDERS {
        assert!(values.contains_key(name), "no value for {name}");
    }
    assert_eq!(values.len(), PLACEHOLDERS.len());
}

#[test]
fn rows_alternate_starting_highlighted() {
    let rows = task_rows(&[task("a", "1"), task("b", "2"), task("c", "3")]);
    let classes: Vec<&str> = rows
        .split("<tr class=\"")
        .skip(1)
        .map(|rest| &rest[..rest.find('"').unwrap()])
        .collect();
    assert_eq!(classes, vec!["bg-slate-100", "", "bg-slate-100"]);

    let rows = account_rows(&[account("x"), account("y")]);
    let classes: Vec<&str> = rows
        .split("<tr class=\"")
        .skip(1)
        .map(|rest| &rest[..rest.find('"').unwrap()])
        .collect();
    assert_eq!(classes, vec!["bg-slate-100", ""]);
}

#[test]
fn empty_lists_render_a_single_placeholder_row() {
    assert_eq!(
        task_rows(&[]),
        "<tr><td colspan='2' class='px-4 py-2 text-sm'>Nessuna lavorazione disponibile</td></tr>"
    );
    assert_eq!(
        account_rows(&[]),
        "<tr><td colspan='4' class='px-4 py-2 text-sm'>Nessuna sottoscrizione disponibile</td></tr>"
    );
}

#[test]
fn missing_row_fields_use_defaults() {
    let rows = task_rows(&[Task::default()]);
    assert!(rows.contains(r#"<div class="text-base font-bold">N/A</div>"#));
    assert!(rows.contains(r#"<div class="text-sm"></div>"#));
    assert!(rows.contains("€ N/A</td>"));

    let rows = account_rows(&[account("x")]);
    assert!(rows.contains(r#"<td class="px-4 py-2 text-sm">N/A</td>"#));
}

#[test]
fn two_tasks_and_no_accounts() {
    let template = Template::parse(TABLES).unwrap();
    let html = populate(&template, &casawa(), date(2025, 3, 5));

    let tasks = &html[html.find("id=\"tasks\"").unwrap()..html.find("id=\"accounts\"").unwrap()];
    assert_eq!(tasks.matches("<tr").count(), 2);
    assert!(tasks.contains("Design"));
    assert!(tasks.contains("€ 1500"));

    let accounts = &html[html.find("id=\"accounts\"").unwrap()..];
    assert_eq!(accounts.matches("<tr").count(), 1);
    assert!(accounts.contains("colspan='4'"));
    assert!(accounts.contains("  € 0</span>"));
}

#[test]
fn deposit_clause_is_spliced_into_payment_terms() {
    assert_eq!(
        payment_terms(&casawa().project),
        "<span class=\"font-medium\">Condizioni di pagamento:</span> \
         Anticipo del <span>30% (€ 720)</span>, saldo alla consegna"
    );
}

#[test]
fn payment_terms_without_sentinel_only_gain_the_label() {
    let project = Project {
        payment_terms: Some("Bonifico a 30 giorni".to_string()),
        deposit_percent: Some("0.3".to_string()),
        ..Default::default()
    };
    assert_eq!(
        payment_terms(&project),
        "<span class=\"font-medium\">Condizioni di pagamento:</span> Bonifico a 30 giorni"
    );
}

#[test]
fn payment_terms_default_to_not_available() {
    assert_eq!(
        payment_terms(&Project::default()),
        "<span class=\"font-medium\">Condizioni di pagamento:</span> N/A"
    );
}

#[test]
fn builtin_template_leaves_no_placeholders() {
    let template = Template::builtin().unwrap();
    let source_len: usize = include_str!("../templates/preventivo.html").len();

    let html = populate(&template, &casawa(), date(2025, 3, 5));
    assert!(!html.contains("{{"));
    assert!(!html.contains("}}"));
    assert!(html.len() > source_len);
}

#[test]
fn missing_supplier_renders_not_available_everywhere() {
    let template = Template::builtin().unwrap();
    let html = populate(&template, &casawa(), date(2025, 3, 5));

    let values = placeholder_values(&casawa());
    assert_eq!(values["fornitoreNome"], "N/A");
    assert_eq!(values["footer-fornitoreNome"], "N/A");
    assert_eq!(values["footer-fornitoreIban"], "N/A");
    assert_eq!(values["fornitoreIndirizzo"], "N/A ");
    assert_eq!(values["fornitoreComune"], "N/A - N/A (N/A)");
    assert!(html.contains("IBAN N/A"));
}

#[test]
fn supplier_details_fill_header_and_footer() {
    let quote = ResolvedQuote {
        supplier: Supplier {
            name: Some("Mario Rossi".to_string()),
            address: Some("Via Roma".to_string()),
            house_number: Some("10".to_string()),
            postal_code: Some("00100".to_string()),
            municipality: Some("Roma".to_string()),
            province: Some("RM".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let values = placeholder_values(&quote);

    assert_eq!(values["fornitoreNome"], "Mario Rossi");
    assert_eq!(values["footer-fornitoreNome"], "Mario Rossi");
    assert_eq!(values["fornitoreIndirizzo"], "Via Roma 10");
    assert_eq!(values["footer-fornitoreComune"], "00100 - Roma (RM)");
}

#[test]
fn client_defaults_and_format() {
    let values = placeholder_values(&ResolvedQuote::default());
    assert_eq!(values["clienteNome"], "N/A");
    assert_eq!(values["clienteIndirizzo"], "N/A N/A");
    assert_eq!(values["clienteComune"], "N/A N/A (N/A)");
    assert_eq!(values["costoSviluppo"], "0");
    assert_eq!(
        values["tempiConsegna"],
        "<span class=\"font-medium\">Tempi di consegna:</span> N/A"
    );
}

#[test]
fn dates_follow_their_anchors() {
    let template =
        Template::parse("<head></head><p>data di emissione</p><p>valido fino al</p>").unwrap();
    let html = populate(&template, &ResolvedQuote::default(), date(2025, 3, 5));

    assert!(html.contains(
        "<p>data di emissione: <span class=\"font-semibold\">5 Marzo 2025</span></p>"
    ));
    assert!(html.contains(
        "<p>valido fino al: <span class=\"font-semibold\">4 Aprile 2025</span></p>"
    ));
}

#[test]
fn missing_anchors_are_skipped() {
    let template = Template::parse("<p>{{clienteNome}}</p>").unwrap();
    let html = populate(&template, &ResolvedQuote::default(), date(2025, 3, 5));
    assert_eq!(html, "<p>N/A</p>");
}

#[test]
fn dates_ignore_anchor_text_in_store_values() {
    let template = Template::parse(
        "<head></head><p>{{progettoTitolo}}</p><p>data di emissione</p><p>valido fino al</p>",
    )
    .unwrap();
    let mut quote = ResolvedQuote::default();
    quote.project.title = Some("data di emissione</p><p>valido fino al".to_string());

    let html = populate(&template, &quote, date(2025, 3, 5));

    assert!(html.contains("<p>data di emissione</p><p>valido fino al</p><p>data di emissione: "));
    assert_eq!(html.matches("5 Marzo 2025").count(), 1);
    assert_eq!(html.matches("4 Aprile 2025").count(), 1);
}

#[test]
fn fill_stops_before_print_safety() {
    let template = Template::parse(
        "<head></head><div id=\"container\"><p>data di emissione</p></div>",
    )
    .unwrap();

    let filled = fill(&template, &ResolvedQuote::default(), date(2025, 3, 5));
    assert!(filled.contains("5 Marzo 2025"));
    assert!(!filled.contains("no-break"));

    let printed = populate(&template, &ResolvedQuote::default(), date(2025, 3, 5));
    assert_eq!(printed, inject_print_safety(&filled));
}
