//! Table and column names of the remote store.
//!
//! Pure string constants. The store's Italian schema lives here and nowhere
//! else.

pub const PROJECTS: &str = "progetti";
pub const CLIENTS: &str = "clienti";
pub const TASKS: &str = "tasks";
pub const ACCOUNTS: &str = "accounts";
pub const PERSONAL: &str = "personal";

pub mod project {
    pub const DOMAIN_KEY: &str = "text domain";
    pub const TITLE: &str = "progetto";
    pub const SUBJECT: &str = "oggetto";
    pub const GROSS: &str = "lordo";
    pub const ANNUAL_COSTS: &str = "costi annuali";
    pub const GROSS_PLUS_COSTS: &str = "lordo + costi";
    pub const BEST_PRICE: &str = "miglior prezzo";
    pub const DISCOUNT: &str = "scontistica";
    pub const DELIVERY_TIME: &str = "tempi di consegna";
    pub const PAYMENT_TERMS: &str = "condizioni di pagamento";
    pub const DEPOSIT_PERCENT: &str = "anticipo perc";
    pub const DEPOSIT: &str = "anticipo";

    pub const CLIENT_LINKS: &str = "cliente";
    pub const TASK_LINKS: &str = "tasks";
    pub const ACCOUNT_LINKS: &str = "accounts";
    pub const PERSONAL_LINKS: &str = "personal";
}

pub mod client {
    pub const NAME: &str = "Nome e cognome / Ragione sociale";
    pub const ADDRESS: &str = "indirizzo";
    pub const HOUSE_NUMBER: &str = "civico";
    pub const POSTAL_CODE: &str = "CAP";
    pub const MUNICIPALITY: &str = "comune";
    pub const PROVINCE: &str = "provincia";
    pub const COUNTRY: &str = "paese";
    pub const TAX_ID: &str = "p. IVA";
}

pub mod task {
    pub const LABEL: &str = "tasks";
    pub const DESCRIPTION: &str = "descrizione";
    pub const GROSS: &str = "lordo";
}

pub mod account {
    pub const SERVICE: &str = "servizio";
    pub const CATEGORY: &str = "tipologia";
    pub const DESCRIPTION: &str = "descrizione";
    pub const ANNUAL_AMOUNT: &str = "importo annuale";
}

pub mod personal {
    pub const NAME: &str = "nome e cognome";
    pub const ADDRESS: &str = "indirizzo (domicilio)";
    pub const HOUSE_NUMBER: &str = "civico (domicilio)";
    pub const POSTAL_CODE: &str = "CAP (domicilio)";
    pub const MUNICIPALITY: &str = "comune (domicilio)";
    pub const PROVINCE: &str = "provincia (domicilio)";
    pub const COUNTRY: &str = "paese (domicilio)";
    pub const TAX_ID: &str = "p. IVA";
    pub const IBAN: &str = "IBAN";
    pub const EMAIL: &str = "email";
    pub const WEBSITE: &str = "sito web";
}
