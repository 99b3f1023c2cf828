//! Demo 02: Search and Reload
//!
//! Saves a small staff list, reloads it from disk, and runs exact,
//! case-insensitive searches against it.
//!
//! Run with: cargo run --example 02_search_and_reload

use emprecord::{Gateway, NewEmployee, SearchCriteria, Store, format_table};
use eyre::Result;

fn employee(first: &str, last: &str, department: &str, phone: &str) -> NewEmployee {
    NewEmployee {
        first_name: first.to_string(),
        last_name: last.to_string(),
        age: 35,
        basic_salary: 42000.0,
        department: department.to_string(),
        date_of_joining: "10-Oct-2019".to_string(),
        address: "9 Harbor Way".to_string(),
        city: "Coast City".to_string(),
        phone_number: phone.to_string(),
    }
}

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let gateway = Gateway::new(temp_dir.path().join("employees.jsonl"));

    println!("Employee Record Search Demo");
    println!("===========================\n");

    let mut store = Store::new();
    store.add(employee("Anna", "Lee", "Sales", "1111111111"))?;
    store.add(employee("Bob", "Kim", "Ops", "2222222222"))?;
    store.add(employee("Cara", "Lee", "sales", "3333333333"))?;
    store.add(employee("Dev", "Rao", "Salesforce", "4444444444"))?;
    gateway.save(store.all())?;
    println!("Saved {} records\n", store.count());

    let reloaded = Store::from_records(gateway.load()?);
    match reloaded.next_id() {
        Some(next) => println!("Reloaded {} records, next Emp No is {}\n", reloaded.count(), next),
        None => println!("Reloaded {} records, no Emp Nos left\n", reloaded.count()),
    }

    let searches = [
        ("department = SALES", SearchCriteria::new("", "", "SALES")),
        ("last name = lee", SearchCriteria::new("", "lee", "")),
        ("department = Sal (no partial matches)", SearchCriteria::new("", "", "Sal")),
        ("no criteria", SearchCriteria::new("", "", "")),
    ];

    for (label, criteria) in &searches {
        let results = reloaded.search(criteria);
        println!("Search: {} -> {} result(s)", label, results.len());
        if !results.is_empty() {
            print!("{}", format_table(&results));
        }
        println!();
    }

    println!("Demo complete!");
    Ok(())
}
