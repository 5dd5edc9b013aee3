//! Country data access.
//!
//! The engine never owns country data; it consumes it through the
//! [`CountryProvider`] query shapes. [`StaticCountries`] ships a built-in
//! table for hosts that do not bring their own dataset.

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::types::Country;

/// Query surface the engine needs from a country dataset.
pub trait CountryProvider {
    /// Full immutable list.
    fn all(&self) -> &[Country];

    /// Lookup by exact name, case-insensitive.
    fn by_name(&self, name: &str) -> Option<&Country> {
        self.all()
            .iter()
            .find(|country| country.name.eq_ignore_ascii_case(name))
    }

    /// All countries on a continent.
    fn by_continent(&self, continent: &str) -> Vec<&Country> {
        self.all()
            .iter()
            .filter(|country| country.continent.eq_ignore_ascii_case(continent))
            .collect()
    }

    /// Uniform random draw; None only when the dataset is empty.
    fn random(&self, rng: &mut dyn RngCore) -> Option<&Country> {
        let all = self.all();
        if all.is_empty() {
            None
        } else {
            Some(&all[rng.random_range(0..all.len())])
        }
    }

    /// Random sample of up to `n` distinct countries.
    fn sample(&self, n: usize, rng: &mut dyn RngCore) -> Vec<&Country> {
        self.all().choose_multiple(rng, n).collect()
    }
}

/// Built-in country table.
#[derive(Debug, Clone)]
pub struct StaticCountries {
    countries: Vec<Country>,
}

impl Default for StaticCountries {
    fn default() -> Self {
        Self {
            countries: builtin_countries(),
        }
    }
}

impl StaticCountries {
    /// Wrap a caller-supplied dataset.
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }
}

impl CountryProvider for StaticCountries {
    fn all(&self) -> &[Country] {
        &self.countries
    }
}

fn country(
    name: &str,
    capital: &str,
    continent: &str,
    sub_continent: &str,
    population: u64,
    main_language: &str,
    main_airport: &str,
    currency: &str,
    area: u64,
    flag_emoji: &str,
) -> Country {
    Country {
        name: name.to_string(),
        capital: capital.to_string(),
        continent: continent.to_string(),
        sub_continent: sub_continent.to_string(),
        population,
        main_language: main_language.to_string(),
        main_airport: main_airport.to_string(),
        currency: currency.to_string(),
        area,
        flag_emoji: flag_emoji.to_string(),
    }
}

#[rustfmt::skip]
fn builtin_countries() -> Vec<Country> {
    vec![
        country("United States", "Washington D.C.", "North America", "Northern America", 331_900_000, "English", "John F. Kennedy International Airport (JFK)", "US Dollar", 9_833_517, "🇺🇸"),
        country("Canada", "Ottawa", "North America", "Northern America", 38_000_000, "English/French", "Toronto Pearson International Airport (YYZ)", "Canadian Dollar", 9_984_670, "🇨🇦"),
        country("Mexico", "Mexico City", "North America", "Central America", 128_900_000, "Spanish", "Mexico City International Airport (MEX)", "Mexican Peso", 1_964_375, "🇲🇽"),
        country("Brazil", "Brasília", "South America", "South America", 215_300_000, "Portuguese", "São Paulo–Guarulhos International Airport (GRU)", "Brazilian Real", 8_514_877, "🇧🇷"),
        country("Argentina", "Buenos Aires", "South America", "South America", 45_400_000, "Spanish", "Ezeiza International Airport (EZE)", "Argentine Peso", 2_780_400, "🇦🇷"),
        country("Chile", "Santiago", "South America", "South America", 19_100_000, "Spanish", "Arturo Merino Benítez International Airport (SCL)", "Chilean Peso", 756_096, "🇨🇱"),
        country("United Kingdom", "London", "Europe", "Northern Europe", 67_500_000, "English", "Heathrow Airport (LHR)", "British Pound", 243_610, "🇬🇧"),
        country("France", "Paris", "Europe", "Western Europe", 67_800_000, "French", "Charles de Gaulle Airport (CDG)", "Euro", 643_801, "🇫🇷"),
        country("Germany", "Berlin", "Europe", "Western Europe", 83_200_000, "German", "Frankfurt Airport (FRA)", "Euro", 357_022, "🇩🇪"),
        country("Italy", "Rome", "Europe", "Southern Europe", 59_100_000, "Italian", "Leonardo da Vinci–Fiumicino Airport (FCO)", "Euro", 301_340, "🇮🇹"),
        country("Spain", "Madrid", "Europe", "Southern Europe", 47_400_000, "Spanish", "Adolfo Suárez Madrid–Barajas Airport (MAD)", "Euro", 505_990, "🇪🇸"),
        country("Russia", "Moscow", "Europe", "Eastern Europe", 143_400_000, "Russian", "Sheremetyevo International Airport (SVO)", "Russian Ruble", 17_098_242, "🇷🇺"),
        country("China", "Beijing", "Asia", "East Asia", 1_412_000_000, "Mandarin", "Beijing Capital International Airport (PEK)", "Renminbi", 9_596_961, "🇨🇳"),
        country("Japan", "Tokyo", "Asia", "East Asia", 125_700_000, "Japanese", "Haneda Airport (HND)", "Japanese Yen", 377_975, "🇯🇵"),
        country("India", "New Delhi", "Asia", "South Asia", 1_408_000_000, "Hindi/English", "Indira Gandhi International Airport (DEL)", "Indian Rupee", 3_287_263, "🇮🇳"),
        country("South Korea", "Seoul", "Asia", "East Asia", 51_700_000, "Korean", "Incheon International Airport (ICN)", "South Korean Won", 100_210, "🇰🇷"),
        country("Indonesia", "Jakarta", "Asia", "Southeast Asia", 273_800_000, "Indonesian", "Soekarno–Hatta International Airport (CGK)", "Indonesian Rupiah", 1_904_569, "🇮🇩"),
        country("Egypt", "Cairo", "Africa", "Northern Africa", 104_300_000, "Arabic", "Cairo International Airport (CAI)", "Egyptian Pound", 1_002_450, "🇪🇬"),
        country("Nigeria", "Abuja", "Africa", "Western Africa", 213_400_000, "English", "Murtala Muhammed International Airport (LOS)", "Nigerian Naira", 923_768, "🇳🇬"),
        country("South Africa", "Cape Town", "Africa", "Southern Africa", 59_400_000, "English/Zulu", "O. R. Tambo International Airport (JNB)", "South African Rand", 1_221_037, "🇿🇦"),
        country("Kenya", "Nairobi", "Africa", "Eastern Africa", 53_000_000, "Swahili/English", "Jomo Kenyatta International Airport (NBO)", "Kenyan Shilling", 580_367, "🇰🇪"),
        country("Australia", "Canberra", "Oceania", "Australia and New Zealand", 25_700_000, "English", "Sydney Airport (SYD)", "Australian Dollar", 7_692_024, "🇦🇺"),
        country("New Zealand", "Wellington", "Oceania", "Australia and New Zealand", 5_100_000, "English/Māori", "Auckland Airport (AKL)", "New Zealand Dollar", 268_021, "🇳🇿"),
    ]
}
