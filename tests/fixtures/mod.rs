//! Record types and column trees shared by the integration tests.
#![allow(dead_code)]

use xlreport::Column;

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

pub fn person(name: &str, age: u32) -> Person {
    Person {
        name: name.to_string(),
        age,
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: u32,
    pub customer: Option<Customer>,
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub name: String,
    pub address: Address,
}

#[derive(Debug, Clone)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

pub fn order(id: u32, customer: Option<(&str, &str, &str)>, total: f64) -> Order {
    Order {
        id,
        customer: customer.map(|(name, city, zip)| Customer {
            name: name.to_string(),
            address: Address {
                city: city.to_string(),
                zip: zip.to_string(),
            },
        }),
        total,
    }
}

// ============================================================================
// Column trees
// ============================================================================

/// `Name | Age`: two top-level leaves.
pub fn person_columns() -> Vec<Column<Person>> {
    vec![
        Column::leaf("Name", |p: &Person| p.name.clone()),
        Column::leaf("Age", |p: &Person| p.age),
    ]
}

/// Unbalanced tree, depth 3, 5 leaves:
///
/// ```text
/// | Id |           Customer           | Total |
/// |    | Name |        Address        |       |
/// |    |      |   City    |    Zip    |       |
/// ```
pub fn order_columns() -> Vec<Column<Order>> {
    vec![
        Column::leaf("Id", |o: &Order| o.id),
        Column::group_ref(
            "Customer",
            |o: &Order| o.customer.as_ref(),
            vec![
                Column::leaf("Name", |c: &Customer| c.name.clone()),
                Column::group_ref(
                    "Address",
                    |c: &Customer| Some(&c.address),
                    vec![
                        Column::leaf("City", |a: &Address| a.city.clone()),
                        Column::leaf("Zip", |a: &Address| a.zip.clone()),
                    ],
                ),
            ],
        ),
        Column::leaf("Total", |o: &Order| o.total),
    ]
}

/// A single group `G` over leaves `A` and `B`, all projecting from `u32`.
pub fn g_ab_columns() -> Vec<Column<u32>> {
    vec![Column::group(
        "G",
        |n: &u32| n * 10,
        vec![
            Column::leaf("A", |n: &u32| *n + 1),
            Column::leaf("B", |n: &u32| *n + 2),
        ],
    )]
}
