pub const UNKNOWN_FLAG_CODE: &str = "xx";
pub const UNKNOWN_MAP_CODE: &str = "XXX";

const FLAG_CODES: &[(&str, &str)] = &[
    ("United States", "us"),
    ("Germany", "de"),
    ("United Kingdom", "gb"),
    ("France", "fr"),
    ("Japan", "jp"),
    ("Canada", "ca"),
    ("Australia", "au"),
    ("Brazil", "br"),
    ("India", "in"),
    ("South Korea", "kr"),
    ("China", "cn"),
    ("Hong Kong", "hk"),
    ("Taiwan", "tw"),
    ("Netherlands", "nl"),
    ("Switzerland", "ch"),
    ("Italy", "it"),
    ("Spain", "es"),
    ("Sweden", "se"),
    ("Belgium", "be"),
    ("Norway", "no"),
    ("Denmark", "dk"),
    ("Finland", "fi"),
    ("Portugal", "pt"),
    ("Greece", "gr"),
    ("Poland", "pl"),
    ("Turkey", "tr"),
    ("South Africa", "za"),
    ("Nigeria", "ng"),
    ("Egypt", "eg"),
    ("Kenya", "ke"),
    ("Russia", "ru"),
    ("Myanmar", "mm"),
];

const MAP_CODES: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("Germany", "DEU"),
    ("United Kingdom", "GBR"),
    ("France", "FRA"),
    ("Japan", "JPN"),
    ("Canada", "CAN"),
    ("Australia", "AUS"),
    ("Brazil", "BRA"),
    ("India", "IND"),
    ("South Korea", "KOR"),
    ("China", "CHN"),
    ("Hong Kong", "HKG"),
    ("Taiwan", "TWN"),
    ("Netherlands", "NLD"),
    ("Switzerland", "CHE"),
    ("Italy", "ITA"),
    ("Spain", "ESP"),
    ("Sweden", "SWE"),
    ("Belgium", "BEL"),
    ("Norway", "NOR"),
    ("Denmark", "DNK"),
    ("Finland", "FIN"),
    ("Portugal", "PRT"),
    ("Greece", "GRC"),
    ("Poland", "POL"),
    ("Turkey", "TUR"),
    ("South Africa", "ZAF"),
    ("Nigeria", "NGA"),
    ("Egypt", "EGY"),
    ("Kenya", "KEN"),
    ("Russia", "RUS"),
    ("Myanmar", "MMR"),
];

fn lookup(table: &'static [(&'static str, &'static str)], country: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, code)| *code)
}

pub fn lookup_flag_code(country: &str) -> Option<&'static str> {
    lookup(FLAG_CODES, country)
}

pub fn lookup_map_code(country: &str) -> Option<&'static str> {
    lookup(MAP_CODES, country)
}

pub fn flag_code(country: &str) -> &'static str {
    match lookup_flag_code(country) {
        Some(code) => code,
        None => {
            tracing::debug!(country, "no flag code; using sentinel");
            UNKNOWN_FLAG_CODE
        }
    }
}

pub fn map_code(country: &str) -> &'static str {
    match lookup_map_code(country) {
        Some(code) => code,
        None => {
            tracing::debug!(country, "no map code; using sentinel");
            UNKNOWN_MAP_CODE
        }
    }
}
