//! Sample report generation for development databases

use knmp_common::db::{
    contacts, persons, Gender, NewContact, NewPerson, Person, PersonUpdate, Status,
};
use knmp_common::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

/// County -> sub-county -> wards
const COUNTIES: &[(&str, &[(&str, &[&str])])] = &[
    (
        "MOMBASA",
        &[
            ("CHANGAMWE", &["PORT REITZ", "KIPEVU", "AIRPORT", "CHAANI"]),
            ("KISAUNI", &["MJAMBERE", "JUNDA", "BAMBURI", "SHANZU"]),
            ("LIKONI", &["MTONGWE", "SHIKA ADABU", "BOFU", "TIMBWANI"]),
        ],
    ),
    (
        "NAIROBI",
        &[
            ("WESTLANDS", &["KITISURU", "PARKLANDS/HIGHRIDGE", "KARURA", "KANGEMI"]),
            ("KIBRA", &["LAINI SABA", "LINDI", "MAKINA", "SARANGOMBE"]),
            ("EMBAKASI EAST", &["UPPER SAVANNAH", "LOWER SAVANNAH", "EMBAKASI", "UTAWALA"]),
        ],
    ),
    (
        "KISUMU",
        &[
            ("KISUMU CENTRAL", &["RAILWAYS", "MIGOSI", "SHAURIMOYO KALOLENI", "KONDELE"]),
            ("NYANDO", &["AWASI/ONJIKO", "AHERO", "KABONYO/KANYAGWAL"]),
        ],
    ),
    (
        "NAKURU",
        &[
            ("NAKURU TOWN EAST", &["BIASHARA", "KIVUMBINI", "FLAMINGO", "MENENGAI"]),
            ("NAIVASHA", &["BIASHARA", "HELLS GATE", "LAKE VIEW", "MAI MAHIU"]),
        ],
    ),
    (
        "UASIN GISHU",
        &[
            ("AINABKOI", &["AINABKOI/OLARE", "KAPSOYA", "KAPTAGAT"]),
            ("KESSES", &["RACECOURSE", "CHEPTIRET/KIPCHAMO", "TULWET/CHUIYAT", "TARAKWA"]),
        ],
    ),
];

const FIRST_NAMES: &[&str] = &[
    "Achieng", "Amina", "Brian", "Chebet", "David", "Faith", "Grace", "Hassan", "Joseph",
    "Kamau", "Mercy", "Njeri", "Otieno", "Wanjiku", "Kiprono", "Zawadi",
];
const LAST_NAMES: &[&str] = &[
    "Mwangi", "Ochieng", "Kiptoo", "Wambui", "Mohamed", "Odhiambo", "Kariuki", "Cherono",
    "Mutua", "Njoroge", "Were", "Barasa",
];
const PLACES: &[&str] = &[
    "bus stage", "market", "primary school gate", "matatu terminus", "shopping centre",
    "church compound", "hospital entrance",
];
const CLOTHING: &[&str] = &[
    "a red jacket", "a blue school uniform", "a green kitenge dress", "black trousers and a grey hoodie",
    "a white shirt and brown shoes", "a yellow raincoat",
];

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// A random report with a Kenyan county/sub-county/ward
pub fn random_report<R: Rng>(rng: &mut R) -> (NewPerson, NewContact) {
    let (county, sub_counties) = COUNTIES[rng.gen_range(0..COUNTIES.len())];
    let (sub_county, wards) = sub_counties[rng.gen_range(0..sub_counties.len())];
    let ward = pick(rng, wards);

    let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
    let name = format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));
    let place = pick(rng, PLACES);

    let person = NewPerson {
        name,
        gender,
        age: Some(rng.gen_range(1..=100)),
        last_seen_location: format!("{} {}, {}", ward, place, sub_county),
        description: format!("Last seen wearing {}.", pick(rng, CLOTHING)),
        county: county.to_string(),
        sub_county: sub_county.to_string(),
        ward: ward.to_string(),
    };

    let contact_first = pick(rng, FIRST_NAMES);
    let contact = NewContact {
        name: format!("{} {}", contact_first, pick(rng, LAST_NAMES)),
        phone_number: format!("07{:08}", rng.gen_range(0..100_000_000u32)),
        email: Some(format!("{}@example.com", contact_first.to_lowercase())),
    };

    (person, contact)
}

/// Insert `count` random reports, each with one contact and a random status
pub async fn seed_reports<R: Rng>(
    pool: &SqlitePool,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Person>> {
    let mut created = Vec::with_capacity(count);

    for _ in 0..count {
        let (new_person, new_contact) = random_report(rng);
        let status = Status::ALL[rng.gen_range(0..Status::ALL.len())];

        let mut tx = pool.begin().await?;
        let person = persons::insert(&mut *tx, &new_person).await?;
        contacts::insert_for_person(&mut *tx, person.id, &new_contact).await?;
        tx.commit().await?;

        let person = if status == Status::Missing {
            person
        } else {
            let update = PersonUpdate {
                name: person.name.clone(),
                gender: person.gender,
                age: person.age,
                last_seen_location: person.last_seen_location.clone(),
                description: person.description.clone(),
                county: person.county.clone(),
                sub_county: person.sub_county.clone(),
                ward: person.ward.clone(),
                status,
                date_found: Some(knmp_common::time::now()),
            };
            persons::update(pool, person.id, &update).await?
        };
        created.push(person);
    }

    Ok(created)
}
