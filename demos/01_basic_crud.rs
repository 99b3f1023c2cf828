//! Demo 01: Basic CRUD Operations
//!
//! Adds, modifies, finds and deletes employee records in memory, then saves
//! them to a temporary file.
//!
//! Run with: cargo run --example 01_basic_crud

use emprecord::{EmployeePatch, Gateway, NewEmployee, Store};
use eyre::Result;

fn main() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let gateway = Gateway::new(temp_dir.path().join("employees.jsonl"));

    println!("Employee Record Basic CRUD Demo");
    println!("===============================\n");

    let mut store = gateway.load_store();
    println!("Loaded {} record(s) from {}\n", store.count(), gateway.path().display());

    // CREATE
    println!("1. ADD - Adding Anna Lee...");
    let id = store.add(NewEmployee {
        first_name: "Anna".to_string(),
        last_name: "Lee".to_string(),
        age: 30,
        basic_salary: 50000.0,
        department: "Eng".to_string(),
        date_of_joining: "01-Jan-2020".to_string(),
        address: "1 Main St".to_string(),
        city: "Metropolis".to_string(),
        phone_number: "1234567890".to_string(),
    })?;
    println!("   Added with Emp No {}\n", id);

    // Invalid input is rejected without touching the store
    println!("2. ADD - Trying an employee aged 17...");
    let rejected = store.add(NewEmployee {
        first_name: "Tim".to_string(),
        last_name: "Young".to_string(),
        age: 17,
        basic_salary: 1000.0,
        department: "Eng".to_string(),
        date_of_joining: "02-Feb-2024".to_string(),
        address: "3 Elm St".to_string(),
        city: "Metropolis".to_string(),
        phone_number: "5551234567".to_string(),
    });
    match rejected {
        Ok(id) => println!("   Unexpectedly added as {}", id),
        Err(e) => println!("   Rejected: {}", e),
    }
    println!("   Record count: {}\n", store.count());

    // UPDATE
    println!("3. MODIFY - New city, bad phone number...");
    let report = store.modify(
        id,
        EmployeePatch {
            city: Some("Star City".to_string()),
            phone_number: Some("12-34".to_string()),
            ..Default::default()
        },
    )?;
    println!("   Updated: {:?}", report.updated);
    for e in &report.rejected {
        println!("   Rejected: {}", e);
    }
    println!();

    // READ
    println!("4. FIND - Looking up Emp No {}...", id);
    if let Some(employee) = store.find_by_id(id) {
        println!("   {} {} lives in {}\n", employee.first_name, employee.last_name, employee.city);
    }

    // PERSIST
    gateway.save(store.all())?;
    println!("5. SAVE - Wrote {} record(s)\n", store.count());

    // DELETE
    println!("6. DELETE - Removing Emp No {}...", id);
    store.delete(id)?;
    println!("   Exists after delete: {}\n", store.find_by_id(id).is_some());

    println!("Demo complete!");
    Ok(())
}
