//! Country-name lookup for the map view.
//!
//! Regions are matched by name, case-insensitively, against a table of
//! country centroids (longitude, latitude in degrees). Aggregate regions such
//! as `World` or `Other countries` have no boundary and stay unresolved.

use serde::Serialize;

/// Geographic position of a country's approximate centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

const CENTROIDS: &[(&str, f64, f64)] = &[
    ("Afghanistan", 66.0, 33.9),
    ("Albania", 20.0, 41.1),
    ("Algeria", 2.6, 28.0),
    ("Andorra", 1.6, 42.5),
    ("Angola", 17.9, -11.2),
    ("Antigua and Barbuda", -61.8, 17.1),
    ("Argentina", -64.0, -34.0),
    ("Armenia", 45.0, 40.1),
    ("Australia", 134.0, -25.0),
    ("Austria", 14.5, 47.5),
    ("Azerbaijan", 47.6, 40.1),
    ("Bahamas", -77.4, 25.0),
    ("Bahrain", 50.6, 26.0),
    ("Bangladesh", 90.4, 23.7),
    ("Barbados", -59.5, 13.2),
    ("Belarus", 28.0, 53.7),
    ("Belgium", 4.5, 50.8),
    ("Belize", -88.5, 17.2),
    ("Benin", 2.3, 9.3),
    ("Bhutan", 90.4, 27.5),
    ("Bolivia", -64.7, -16.7),
    ("Bosnia and Herzegovina", 17.7, 43.9),
    ("Botswana", 24.0, -22.3),
    ("Brazil", -53.0, -10.5),
    ("Brunei", 114.7, 4.5),
    ("Bulgaria", 25.5, 42.7),
    ("Burkina Faso", -1.6, 12.2),
    ("Burundi", 29.9, -3.4),
    ("Cabo Verde", -24.0, 16.0),
    ("Cambodia", 104.9, 12.6),
    ("Cameroon", 12.4, 5.7),
    ("Canada", -106.0, 57.0),
    ("Central African Republic", 20.9, 6.6),
    ("Chad", 18.7, 15.5),
    ("Chile", -71.0, -30.0),
    ("China", 104.0, 35.0),
    ("Colombia", -73.0, 4.0),
    ("Comoros", 43.9, -11.9),
    ("Costa Rica", -84.0, 9.7),
    ("Cote d'Ivoire", -5.5, 7.5),
    ("Croatia", 15.2, 45.1),
    ("Cuba", -79.0, 21.5),
    ("Cyprus", 33.4, 35.1),
    ("Czechia", 15.5, 49.8),
    ("Democratic Republic of the Congo", 23.6, -2.9),
    ("Denmark", 9.5, 56.3),
    ("Djibouti", 42.6, 11.8),
    ("Dominica", -61.4, 15.4),
    ("Dominican Republic", -70.2, 18.7),
    ("Ecuador", -78.2, -1.8),
    ("Egypt", 30.8, 26.8),
    ("El Salvador", -88.9, 13.8),
    ("Equatorial Guinea", 10.3, 1.7),
    ("Eritrea", 39.8, 15.2),
    ("Estonia", 25.0, 58.7),
    ("Eswatini", 31.5, -26.5),
    ("Ethiopia", 40.5, 9.1),
    ("Fiji", 178.1, -17.7),
    ("Finland", 26.0, 64.0),
    ("France", 2.5, 46.5),
    ("French Guiana", -53.1, 3.9),
    ("Gabon", 11.6, -0.8),
    ("Gambia", -15.3, 13.4),
    ("Georgia", 43.4, 42.3),
    ("Germany", 10.4, 51.2),
    ("Ghana", -1.0, 7.9),
    ("Greece", 21.8, 39.1),
    ("Greenland", -41.0, 72.0),
    ("Grenada", -61.7, 12.1),
    ("Guatemala", -90.2, 15.8),
    ("Guinea", -10.9, 10.4),
    ("Guinea-Bissau", -15.2, 11.8),
    ("Guyana", -58.9, 4.9),
    ("Haiti", -72.3, 19.0),
    ("Honduras", -86.2, 15.2),
    ("Hong Kong", 114.2, 22.3),
    ("Hungary", 19.5, 47.2),
    ("Iceland", -19.0, 65.0),
    ("India", 79.0, 22.0),
    ("Indonesia", 117.0, -2.5),
    ("Iran", 53.7, 32.4),
    ("Iraq", 43.7, 33.2),
    ("Ireland", -8.2, 53.4),
    ("Israel", 34.9, 31.0),
    ("Italy", 12.6, 42.8),
    ("Jamaica", -77.3, 18.1),
    ("Japan", 138.0, 36.5),
    ("Jordan", 36.2, 30.6),
    ("Kazakhstan", 67.0, 48.0),
    ("Kenya", 37.9, 0.0),
    ("Kiribati", -168.7, 1.9),
    ("Kosovo", 20.9, 42.6),
    ("Kuwait", 47.5, 29.3),
    ("Kyrgyzstan", 74.8, 41.2),
    ("Laos", 102.5, 18.2),
    ("Latvia", 24.6, 56.9),
    ("Lebanon", 35.9, 33.9),
    ("Lesotho", 28.2, -29.6),
    ("Liberia", -9.4, 6.4),
    ("Libya", 17.2, 26.3),
    ("Liechtenstein", 9.6, 47.2),
    ("Lithuania", 23.9, 55.2),
    ("Luxembourg", 6.1, 49.8),
    ("Madagascar", 46.9, -19.4),
    ("Malawi", 34.3, -13.3),
    ("Malaysia", 102.0, 4.2),
    ("Maldives", 73.2, 3.2),
    ("Mali", -4.0, 17.6),
    ("Malta", 14.4, 35.9),
    ("Marshall Islands", 171.2, 7.1),
    ("Mauritania", -10.9, 21.0),
    ("Mauritius", 57.6, -20.3),
    ("Mexico", -102.5, 23.6),
    ("Micronesia", 158.2, 6.9),
    ("Moldova", 28.4, 47.4),
    ("Monaco", 7.4, 43.7),
    ("Mongolia", 103.8, 46.9),
    ("Montenegro", 19.4, 42.7),
    ("Morocco", -6.3, 31.8),
    ("Mozambique", 35.5, -18.7),
    ("Myanmar", 96.0, 21.0),
    ("Namibia", 17.0, -22.0),
    ("Nauru", 166.9, -0.5),
    ("Nepal", 84.1, 28.4),
    ("Netherlands", 5.3, 52.1),
    ("New Caledonia", 165.6, -21.3),
    ("New Zealand", 172.5, -41.5),
    ("Nicaragua", -85.2, 12.9),
    ("Niger", 8.1, 17.6),
    ("Nigeria", 8.7, 9.1),
    ("North Korea", 127.5, 40.3),
    ("North Macedonia", 21.7, 41.6),
    ("Norway", 9.0, 61.0),
    ("Oman", 57.0, 21.5),
    ("Pakistan", 69.3, 30.4),
    ("Palau", 134.6, 7.5),
    ("Palestine", 35.2, 31.9),
    ("Panama", -80.8, 8.5),
    ("Papua New Guinea", 145.0, -6.3),
    ("Paraguay", -58.4, -23.4),
    ("Peru", -75.0, -9.2),
    ("Philippines", 122.0, 12.9),
    ("Poland", 19.1, 51.9),
    ("Portugal", -8.2, 39.6),
    ("Puerto Rico", -66.6, 18.2),
    ("Qatar", 51.2, 25.4),
    ("Republic of the Congo", 15.8, -0.7),
    ("Romania", 25.0, 45.9),
    ("Russia", 97.0, 61.5),
    ("Rwanda", 29.9, -2.0),
    ("Saint Kitts and Nevis", -62.8, 17.3),
    ("Saint Lucia", -61.0, 13.9),
    ("Saint Vincent and the Grenadines", -61.2, 13.3),
    ("Samoa", -172.1, -13.8),
    ("San Marino", 12.5, 43.9),
    ("Sao Tome and Principe", 6.6, 0.2),
    ("Saudi Arabia", 45.0, 24.0),
    ("Senegal", -14.5, 14.5),
    ("Serbia", 21.0, 44.0),
    ("Seychelles", 55.5, -4.7),
    ("Sierra Leone", -11.8, 8.5),
    ("Singapore", 103.8, 1.4),
    ("Slovakia", 19.7, 48.7),
    ("Slovenia", 14.8, 46.2),
    ("Solomon Islands", 160.2, -9.6),
    ("Somalia", 46.2, 5.2),
    ("South Africa", 24.7, -29.0),
    ("South Korea", 127.8, 36.4),
    ("South Sudan", 31.3, 7.9),
    ("Spain", -3.7, 40.2),
    ("Sri Lanka", 80.8, 7.9),
    ("Sudan", 30.2, 12.9),
    ("Suriname", -56.0, 4.0),
    ("Sweden", 16.0, 62.5),
    ("Switzerland", 8.2, 46.8),
    ("Syria", 38.9, 35.0),
    ("Taiwan", 121.0, 23.7),
    ("Tajikistan", 71.3, 38.9),
    ("Tanzania", 34.9, -6.4),
    ("Thailand", 101.0, 15.1),
    ("Timor-Leste", 125.7, -8.9),
    ("Togo", 0.8, 8.6),
    ("Tonga", -175.2, -21.2),
    ("Trinidad and Tobago", -61.2, 10.7),
    ("Tunisia", 9.5, 33.9),
    ("Turkey", 35.2, 39.0),
    ("Turkmenistan", 59.6, 39.0),
    ("Tuvalu", 179.2, -7.1),
    ("Uganda", 32.3, 1.4),
    ("Ukraine", 31.2, 48.4),
    ("United Arab Emirates", 53.8, 23.4),
    ("United Kingdom", -2.5, 54.0),
    ("United States", -98.6, 39.8),
    ("Uruguay", -55.8, -32.5),
    ("Uzbekistan", 64.6, 41.4),
    ("Vanuatu", 166.9, -15.4),
    ("Venezuela", -66.6, 6.4),
    ("Vietnam", 106.3, 16.0),
    ("Western Sahara", -12.9, 24.2),
    ("Yemen", 48.5, 15.6),
    ("Zambia", 27.8, -13.1),
    ("Zimbabwe", 29.2, -19.0),
];

/// Alternative spellings found in commodity statistics.
const ALIASES: &[(&str, &str)] = &[
    ("Bosnia", "Bosnia and Herzegovina"),
    ("Brunei Darussalam", "Brunei"),
    ("Burma", "Myanmar"),
    ("Cape Verde", "Cabo Verde"),
    ("Congo (Brazzaville)", "Republic of the Congo"),
    ("Congo (Kinshasa)", "Democratic Republic of the Congo"),
    ("Congo, Democratic Republic of the", "Democratic Republic of the Congo"),
    ("Congo, Republic of the", "Republic of the Congo"),
    ("Czech Republic", "Czechia"),
    ("DRC", "Democratic Republic of the Congo"),
    ("Côte d'Ivoire", "Cote d'Ivoire"),
    ("Ivory Coast", "Cote d'Ivoire"),
    ("Gambia, The", "Gambia"),
    ("Iran, Islamic Republic of", "Iran"),
    ("Korea, North", "North Korea"),
    ("Korea, Republic of", "South Korea"),
    ("Korea, South", "South Korea"),
    ("Lao People's Democratic Republic", "Laos"),
    ("Macedonia", "North Macedonia"),
    ("Moldova, Republic of", "Moldova"),
    ("Republic of Korea", "South Korea"),
    ("Russian Federation", "Russia"),
    ("Swaziland", "Eswatini"),
    ("Syrian Arab Republic", "Syria"),
    ("Tanzania, United Republic of", "Tanzania"),
    ("The Bahamas", "Bahamas"),
    ("Türkiye", "Turkey"),
    ("UAE", "United Arab Emirates"),
    ("UK", "United Kingdom"),
    ("United States of America", "United States"),
    ("USA", "United States"),
    ("Venezuela, Bolivarian Republic of", "Venezuela"),
    ("Viet Nam", "Vietnam"),
];

/// Resolve a region name to its centroid, or `None` for names that do not
/// denote a single country.
pub fn locate(region: &str) -> Option<LonLat> {
    let name = region.trim();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map_or(name, |(_, country)| *country);

    CENTROIDS
        .iter()
        .find(|(country, _, _)| country.eq_ignore_ascii_case(canonical))
        .map(|&(_, lon, lat)| LonLat { lon, lat })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_and_aliases() {
        assert_eq!(locate("chile"), Some(LonLat { lon: -71.0, lat: -30.0 }));
        assert_eq!(locate("Congo (Kinshasa)"), locate("Democratic Republic of the Congo"));
        assert!(locate(" Australia ").is_some());
    }

    #[test]
    fn resolves_producers_outside_the_major_markets() {
        let regions = [
            "Italy",
            "Egypt",
            "Venezuela",
            "Poland",
            "Pakistan",
            "Congo (Brazzaville)",
            "Kyrgyzstan",
            "Greece",
            "Oman",
            "Sierra Leone",
            "Korea, North",
            "Taiwan",
            "Czech Republic",
            "Cote d'Ivoire",
        ];
        let unresolved: Vec<_> = regions.iter().filter(|r| locate(r).is_none()).collect();
        assert!(unresolved.is_empty(), "unresolved: {unresolved:?}");
        assert_ne!(locate("Congo (Brazzaville)"), locate("Congo (Kinshasa)"));
        assert_eq!(locate("korea, north"), locate("North Korea"));
    }

    #[test]
    fn aggregate_regions_are_unresolved() {
        assert_eq!(locate("World"), None);
        assert_eq!(locate("Other countries"), None);
    }
}
