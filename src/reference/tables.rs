//! Built-in reference tables.
//!
//! Country keys are lowercase English names. Both tables carry a `"default"`
//! entry used when a country has no entry of its own.

/// Carbon price by country, USD per tonne CO2.
pub(super) const CARBON_PRICES: &[(&str, f64)] = &[
    ("default", 50.0),
    ("canada", 65.0),
    ("united kingdom", 85.0),
    ("germany", 90.0),
    ("france", 95.0),
    ("sweden", 130.0),
    ("switzerland", 120.0),
    ("norway", 80.0),
    ("united states", 45.0),
    ("china", 15.0),
    ("india", 10.0),
    ("australia", 55.0),
    ("japan", 40.0),
    ("south korea", 25.0),
    ("brazil", 12.0),
    ("mexico", 18.0),
    ("south africa", 20.0),
];

/// Average annual emissions by country, tonnes CO2 per capita.
pub(super) const COUNTRY_AVERAGES: &[(&str, f64)] = &[
    ("default", 4.5),
    ("united states", 14.2),
    ("canada", 15.4),
    ("australia", 15.0),
    ("saudi arabia", 16.9),
    ("russia", 11.8),
    ("japan", 8.6),
    ("germany", 7.9),
    ("china", 7.6),
    ("united kingdom", 5.2),
    ("france", 4.6),
    ("india", 1.9),
    ("brazil", 2.0),
    ("mexico", 3.0),
    ("south africa", 7.4),
    ("indonesia", 2.3),
    ("argentina", 3.9),
    ("turkey", 5.1),
    ("pakistan", 0.9),
    ("bangladesh", 0.6),
    ("nigeria", 0.6),
    ("egypt", 2.5),
    ("vietnam", 3.5),
    ("philippines", 1.2),
    ("thailand", 3.8),
    ("malaysia", 8.0),
    ("singapore", 8.9),
    ("south korea", 11.8),
    ("italy", 5.4),
    ("spain", 5.0),
    ("netherlands", 8.1),
    ("sweden", 3.4),
    ("norway", 7.6),
    ("switzerland", 4.1),
    ("austria", 6.9),
    ("belgium", 8.0),
    ("denmark", 5.0),
    ("finland", 7.9),
    ("ireland", 7.7),
    ("new zealand", 6.8),
    ("israel", 6.2),
    ("chile", 4.4),
    ("peru", 1.7),
    ("colombia", 1.8),
    ("morocco", 1.7),
    ("kenya", 0.4),
    ("ethiopia", 0.1),
    ("ghana", 0.5),
    ("tanzania", 0.2),
    ("uganda", 0.1),
    ("zambia", 0.3),
    ("zimbabwe", 0.7),
    ("botswana", 2.6),
    ("namibia", 1.5),
    ("myanmar", 0.6),
    ("sri lanka", 0.8),
    ("nepal", 0.3),
    ("cambodia", 0.9),
    ("laos", 2.6),
    ("mongolia", 11.1),
    ("uzbekistan", 3.2),
    ("kazakhstan", 13.0),
    ("ukraine", 5.0),
    ("poland", 7.8),
    ("czech republic", 9.0),
    ("romania", 3.7),
    ("hungary", 4.4),
    ("portugal", 4.0),
    ("greece", 5.7),
    ("croatia", 4.2),
    ("serbia", 6.0),
    ("bulgaria", 6.8),
    ("slovakia", 6.0),
    ("slovenia", 6.0),
    ("lithuania", 3.5),
    ("latvia", 3.3),
    ("estonia", 7.8),
    ("cyprus", 5.6),
    ("luxembourg", 15.3),
    ("malta", 3.0),
    ("iceland", 9.9),
    ("liechtenstein", 3.8),
    ("monaco", 2.5),
    ("andorra", 6.0),
    ("san marino", 5.5),
    ("vatican city", 0.5),
];
