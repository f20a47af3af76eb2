pub fn listings_answer_fixture() -> &'static str {
    return r#"
Here are 2 listings that match what you asked for.

1. Palm Residences, Dubai Marina. Take the tour at https://tours.infinitiview.test/palm-residences/virtual-tour.
2. Creek Heights, Dubai Creek Harbour (details: https://creekheights.test/brochure)

Both developers are happy to arrange a visit, see https://creekheights.test/brochure for opening hours!
"#
    .trim();
}

pub fn property_fixture() -> &'static str {
    return r#"{
    "Property Name": "Palm Residences",
    "Description": "Sea facing apartments with private beach access and a rooftop pool.",
    "Location": "Dubai Marina",
    "Bed rooms": "3",
    "Baths": "2",
    "Home Type": "residential",
    "Price": "1250000",
    "Currency": "USD",
    "Status": "Available",
    "InfinitiView Virtual tour URLs": "https://tours.infinitiview.test/palm-residences",
    "Website URL": "N/A",
    "Developer Name": "Emaar"
}"#;
}
