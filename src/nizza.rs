//! Nice classification (Nizza-Klassen) lookup and class-number parsing.

use crate::types::NiceClass;

/// German short descriptions of the 45 Nice classes, index 0 = class 1.
const NIZZA_CLASSES: [&str; 45] = [
    "Chemische Erzeugnisse für gewerbliche, wissenschaftliche, fotografische, land-, garten- und forstwirtschaftliche Zwecke",
    "Farben, Firnisse, Lacke; Rostschutzmittel, Holzkonservierungsmittel; Färbemittel, Farbstoffe; Druckfarben",
    "Wasch- und Bleichmittel; Putz-, Polier-, Fettentfernungs- und Schleifmittel; Parfümerien, Mittel zur Körper- und Schönheitspflege, Haarwässer; Zahnputzmittel",
    "Technische Öle und Fette; Schmiermittel; Brennstoffe und Leuchtstoffe; Kerzen und Dochte für Beleuchtungszwecke",
    "Pharmazeutische und veterinärmedizinische Erzeugnisse; Hygienepräparate für medizinische Zwecke; diätetische Lebensmittel und Erzeugnisse für medizinische oder veterinärmedizinische Zwecke",
    "Unedle Metalle und deren Legierungen; Baumaterialien aus Metall; transportable Bauten aus Metall; Schlosserarbeiten und Kleineisenwaren; Metallrohre; Geldschränke",
    "Maschinen und Werkzeugmaschinen; Motoren (ausgenommen Motoren für Landfahrzeuge); Kupplungen und Vorrichtungen zur Kraftübertragung (ausgenommen solche für Landfahrzeuge)",
    "Handwerkzeuge und handgetriebene Geräte; Messerschmiedewaren, Gabeln und Löffel; Hieb- und Stichwaffen; Rasierapparate",
    "Wissenschaftliche, Schifffahrts-, Vermessungs-, fotografische, Film-, optische Apparate und Instrumente; elektrische Apparate und Instrumente; Computer, Software",
    "Chirurgische, ärztliche, zahn- und tierärztliche Instrumente und Apparate; künstliche Gliedmaßen, Augen und Zähne; orthopädische Artikel; chirurgisches Nahtmaterial",
    "Beleuchtungs-, Heizungs-, Dampferzeugungs-, Koch-, Kühl-, Trocken-, Lüftungs- und Wasserleitungsgeräte sowie sanitäre Anlagen",
    "Fahrzeuge; Apparate zur Beförderung auf dem Lande, in der Luft oder auf dem Wasser",
    "Schusswaffen; Munition und Geschosse; Sprengstoffe; Feuerwerkskörper",
    "Edelmetalle und deren Legierungen; Juwelierwaren, Schmuckwaren, Edelsteine; Uhren und Zeitmessinstrumente",
    "Musikinstrumente",
    "Papier und Pappe (Karton); Druckereierzeugnisse; Buchbinderartikel; Fotografien; Schreibwaren und Büroartikel (ausgenommen Möbel)",
    "Kautschuk, Guttapercha, Gummi, Asbest, Glimmer; Waren daraus; Schläuche (nicht aus Metall); Dichtungs-, Polster- und Isoliermaterial",
    "Leder und Lederimitationen; Häute und Felle; Reise- und Handkoffer; Regenschirme und Sonnenschirme; Spazierstöcke; Peitschen, Pferdegeschirr und Sattlerwaren",
    "Baumaterialien (nicht aus Metall); Rohre (nicht aus Metall) für Bauzwecke; Asphalt, Pech, Teer und Bitumen; transportable Bauten (nicht aus Metall); Denkmäler (nicht aus Metall)",
    "Möbel, Spiegel, Bilderrahmen; Waren aus Holz, Kork, Rohr, Binsen, Weide, Horn, Knochen, Elfenbein, Fischbein, Schildpatt, Bernstein, Perlmutter, Meerschaum",
    "Geräte und Behälter für Haushalt und Küche; Glaswaren, Porzellan und Steingut; Kämme und Schwämme; Bürsten und Pinsel; Putzzeug; Stahlwolle",
    "Seile und Bindfaden; Netze, Zelte und Planen; Polsterfüllstoffe; rohe Gespinstfasern",
    "Garne und Fäden für textile Zwecke",
    "Webstoffe und Textilwaren, soweit nicht in anderen Klassen enthalten; Bett- und Tischdecken",
    "Bekleidungsstücke, Schuhwaren, Kopfbedeckungen",
    "Spitzen und Stickereien, Bänder und Schnürbänder; Knöpfe, Haken und Ösen, Nadeln; künstliche Blumen; Haarschmuck; Kunsthaar",
    "Teppiche, Fußmatten, Matten, Linoleum und andere Fußbodenbeläge; Tapeten (ausgenommen aus textilem Material)",
    "Spiele und Spielzeug; Turn- und Sportartikel; Christbaumschmuck",
    "Fleisch, Fisch, Geflügel und Wild; Fleischextrakte; konserviertes, tiefgekühltes, getrocknetes und gekochtes Obst und Gemüse; Gallerten (Gelees); Konfitüren, Kompotte; Eier; Milch, Käse, Butter, Joghurt",
    "Kaffee, Tee, Kakao und Kaffee-Ersatzmittel; Reis, Nudeln; Mehle und Getreidepräparate; Brot, feine Backwaren und Konditorwaren; Speiseeis; Zucker, Honig; Gewürze",
    "Rohes oder teilweise bearbeitetes Getreide; lebende Tiere; frisches Obst und Gemüse; natürliche Pflanzen und Blumen; Tierfutter; Malz",
    "Biere; Mineralwässer und kohlensäurehaltige Wässer; alkoholfreie Getränke; Fruchtgetränke und Fruchtsäfte; Sirupe und andere Präparate für die Zubereitung von Getränken",
    "Alkoholische Getränke (ausgenommen Biere)",
    "Tabak; Raucherartikel; Streichhölzer",
    "Werbung; Geschäftsführung; Unternehmensverwaltung; Büroarbeiten",
    "Versicherungswesen; Finanzwesen; Geldgeschäfte; Immobilienwesen",
    "Bauwesen; Reparaturwesen; Installationsarbeiten",
    "Telekommunikation",
    "Transportwesen; Verpackung und Lagerung von Waren; Veranstaltung von Reisen",
    "Materialbearbeitung",
    "Erziehung; Ausbildung; Unterhaltung; sportliche und kulturelle Aktivitäten",
    "Wissenschaftliche und technologische Dienstleistungen und Forschungsarbeiten; Industrielle Analyse- und Forschungsdienstleistungen; Entwurf und Entwicklung von Computerhardware und -software",
    "Dienstleistungen zur Verpflegung und Beherbergung von Gästen",
    "Medizinische und veterinärmedizinische Dienstleistungen; Gesundheits- und Schönheitspflege für Menschen und Tiere; Dienstleistungen im Bereich der Land-, Garten- oder Forstwirtschaft",
    "Juristische Dienstleistungen; Sicherheitsdienste zum physischen Schutz von Sachgütern oder Personen; von Dritten erbrachte persönliche und soziale Dienstleistungen",
];

/// Resolve a class number to its description. Total over all integers:
/// numbers outside 1..=45 yield a placeholder instead of an error, so a
/// stray token can never abort an extraction.
pub fn describe(class_number: u32) -> String {
    match class_number {
        1..=45 => NIZZA_CLASSES[(class_number - 1) as usize].to_string(),
        n => format!("Unbekannte Klasse {n}"),
    }
}

/// Attach descriptions to a list of class numbers, preserving order.
pub fn enrich(numbers: &[u32]) -> Vec<NiceClass> {
    numbers
        .iter()
        .map(|&n| NiceClass {
            class_number: n,
            description: describe(n),
        })
        .collect()
}

/// Pull class numbers out of free text like "9, 42" or "35; 38 41".
/// Tokens that are not integers in 1..=45 are dropped silently; order and
/// duplicates are preserved.
pub fn parse_class_numbers(text: &str) -> Vec<u32> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter_map(|tok| tok.trim().parse::<u32>().ok())
        .filter(|&n| (1..=45).contains(&n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_covers_whole_domain() {
        for n in 1..=45 {
            let d = describe(n);
            assert!(!d.is_empty());
            assert!(!d.starts_with("Unbekannte"), "class {n} has no description");
        }
        assert_eq!(describe(15), "Musikinstrumente");
        assert_eq!(describe(38), "Telekommunikation");
    }

    #[test]
    fn describe_out_of_range_is_placeholder() {
        assert_eq!(describe(0), "Unbekannte Klasse 0");
        assert_eq!(describe(46), "Unbekannte Klasse 46");
        assert_eq!(describe(999), "Unbekannte Klasse 999");
    }

    #[test]
    fn parse_mixed_separators() {
        assert_eq!(parse_class_numbers("9, 42"), vec![9, 42]);
        assert_eq!(parse_class_numbers("35; 38 41"), vec![35, 38, 41]);
        assert_eq!(parse_class_numbers("1,2;3 4\n5"), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn parse_drops_invalid_keeps_order_and_dupes() {
        assert_eq!(parse_class_numbers("0, 9, 46, abc, 42, 9"), vec![9, 42, 9]);
        assert_eq!(parse_class_numbers(""), Vec::<u32>::new());
        assert_eq!(parse_class_numbers("Klasse neun"), Vec::<u32>::new());
    }

    #[test]
    fn enrich_preserves_order() {
        let classes = enrich(&[42, 9]);
        assert_eq!(classes[0].class_number, 42);
        assert_eq!(classes[1].class_number, 9);
        assert!(classes[0].description.contains("technologische"));
    }
}
