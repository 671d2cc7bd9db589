//! Built-in ro-RO command set.
//!
//! Order matters: exact commands come before navigation, navigation before
//! creation, and the open-ended captures (`caută {query}`, bare amounts)
//! come last so they never shadow a more specific phrase.

use glas_types::{ActionType, ParamBinding, Result, ValueNormalizer};

use super::CommandPattern;
use super::matcher::PhraseMatcher;
use super::template::TemplateMatcher;

/// Verbs that introduce a navigation destination.
pub const NAV_VERBS: &[&str] = &["du-mă la", "mergi la", "deschide", "arată", "navighează la"];

struct Destination {
    id: &'static str,
    path: &'static str,
    names: &'static [&'static str],
    /// Phrases accepted without a navigation verb.
    standalone: &'static [&'static str],
    description: &'static str,
}

const DESTINATIONS: &[Destination] = &[
    Destination {
        id: "nav-vat-report",
        path: "/reports/vat",
        names: &["raport tva", "raportul tva"],
        standalone: &["raport tva", "declarație tva", "arată tva"],
        description: "Raportul TVA",
    },
    Destination {
        id: "nav-dashboard",
        path: "/dashboard",
        names: &["dashboard", "pagina principală"],
        standalone: &["pagina principală"],
        description: "Pagina principală",
    },
    Destination {
        id: "nav-invoices",
        path: "/invoices",
        names: &["facturi", "facturile"],
        standalone: &["lista facturi"],
        description: "Lista de facturi",
    },
    Destination {
        id: "nav-reports",
        path: "/reports",
        names: &["rapoarte", "rapoartele"],
        standalone: &[],
        description: "Rapoarte",
    },
    Destination {
        id: "nav-hr",
        path: "/hr",
        names: &["hr", "resurse umane", "angajați"],
        standalone: &["personal"],
        description: "Resurse umane",
    },
    Destination {
        id: "nav-payments",
        path: "/payments",
        names: &["plăți", "plățile"],
        standalone: &[],
        description: "Plăți",
    },
    Destination {
        id: "nav-partners",
        path: "/partners",
        names: &["parteneri", "partenerii", "clienți"],
        standalone: &[],
        description: "Parteneri",
    },
    Destination {
        id: "nav-settings",
        path: "/settings",
        names: &["setări", "setările"],
        standalone: &[],
        description: "Setări",
    },
    Destination {
        id: "nav-anaf",
        path: "/compliance/anaf",
        names: &["anaf"],
        standalone: &["status anaf", "verifică anaf", "declarații anaf"],
        description: "Stare declarații ANAF",
    },
];

struct Creation {
    id: &'static str,
    resource: &'static str,
    path: &'static str,
    phrases: &'static [&'static str],
    description: &'static str,
}

const CREATIONS: &[Creation] = &[
    Creation {
        id: "create-invoice",
        resource: "invoice",
        path: "/invoices/new",
        phrases: &["creează factură", "creează o factură", "factură nouă", "emite factură"],
        description: "Factură nouă",
    },
    Creation {
        id: "create-payment",
        resource: "payment",
        path: "/payments/new",
        phrases: &["înregistrează plată", "înregistrează o plată", "adaugă plată", "plată nouă"],
        description: "Înregistrează o plată",
    },
    Creation {
        id: "create-partner",
        resource: "partner",
        path: "/partners/new",
        phrases: &["adaugă partener", "partener nou", "client nou"],
        description: "Partener nou",
    },
];

/// Build the built-in patterns in evaluation order.
///
/// `fuzzy` is the edit distance tolerated by static phrases.
pub fn patterns(fuzzy: usize) -> Result<Vec<CommandPattern>> {
    let mut out = vec![
        CommandPattern::new(
            "help",
            ActionType::Help,
            PhraseMatcher::new(
                &["ajutor", "help", "ce comenzi sunt disponibile", "cum folosesc"],
                fuzzy,
            ),
        )
        .with_description("Lista comenzilor vocale"),
        CommandPattern::new(
            "stop-listening",
            ActionType::Control,
            PhraseMatcher::new(&["stop", "gata", "oprește ascultarea", "nu mai asculta"], fuzzy),
        )
        .with_param("command", "stop")
        .with_description("Oprește ascultarea"),
    ];

    for dest in DESTINATIONS {
        let mut phrases: Vec<String> = NAV_VERBS
            .iter()
            .flat_map(|verb| dest.names.iter().map(move |name| format!("{verb} {name}")))
            .collect();
        phrases.extend(dest.standalone.iter().map(|p| p.to_string()));

        out.push(
            CommandPattern::new(dest.id, ActionType::Navigate, PhraseMatcher::new(&phrases, fuzzy))
                .with_param("path", dest.path)
                .with_description(dest.description),
        );
    }

    out.push(
        CommandPattern::new(
            "upload-document",
            ActionType::Navigate,
            PhraseMatcher::new(
                &["încarcă document", "încarcă un document", "upload document", "adaugă document"],
                fuzzy,
            ),
        )
        .with_param("path", "/documents/upload")
        .with_description("Încarcă un document"),
    );

    for creation in CREATIONS {
        out.push(
            CommandPattern::new(
                creation.id,
                ActionType::Create,
                PhraseMatcher::new(creation.phrases, fuzzy),
            )
            .with_param("resource", creation.resource)
            .with_param("path", creation.path)
            .with_description(creation.description),
        );
    }

    out.push(
        CommandPattern::new(
            "generate-report",
            ActionType::Report,
            TemplateMatcher::parse(&[
                "generează raport {kind}",
                "generează raportul {kind}",
                "creează raport {kind}",
            ])?,
        )
        .with_binding(ParamBinding::new("kind", "reportType", ValueNormalizer::Verbatim))
        .with_description("Generează un raport"),
    );

    out.push(
        CommandPattern::new(
            "calculate-vat",
            ActionType::Calculate,
            TemplateMatcher::parse(&[
                "calculează tva pentru {amount:number} {currency:currency?}",
                "tva pentru {amount:number} {currency:currency?}",
                "calculează tva",
                "cât e tva",
            ])?,
        )
        .with_param("service", "vat")
        .with_binding(ParamBinding::new("amount", "amount", ValueNormalizer::DecimalPoint))
        .with_binding(ParamBinding::new("currency", "currency", ValueNormalizer::CurrencyCode))
        .with_description("Calculează TVA"),
    );

    out.push(
        CommandPattern::new(
            "search",
            ActionType::Search,
            TemplateMatcher::parse(&["caută {query}", "găsește {query}"])?,
        )
        .with_binding(ParamBinding::verbatim("query"))
        .with_description("Căutare"),
    );

    out.push(
        CommandPattern::new(
            "amount",
            ActionType::Amount,
            TemplateMatcher::parse(&["{value:number} {currency:currency?}"])?,
        )
        .with_binding(ParamBinding::new("value", "value", ValueNormalizer::DecimalPoint))
        .with_binding(ParamBinding::new("currency", "currency", ValueNormalizer::CurrencyCode))
        .with_description("Dictare sumă"),
    );

    Ok(out)
}
