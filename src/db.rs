//! Sets up the application's database and guards access to the shared connection.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, functions::FunctionFlags};

use crate::{Error, transaction::create_transaction_table};

/// Create all of the database tables for the application and register the SQL
/// functions its queries use.
///
/// Safe to call on a database that has already been initialized. SQL functions
/// only live as long as the connection, so this must be called on every new
/// connection.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_functions(connection)?;

    let transaction = connection.unchecked_transaction()?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Register `unicode_lower(text)`, which lowercases every Unicode letter
/// rather than only the ASCII ones like SQLite's built-in `lower`.
fn register_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text: Option<String> = context.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}

/// Acquire the lock on the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock has been poisoned by a thread
/// that panicked while holding it.
pub(crate) fn lock_connection(
    connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, transaction::count_transactions};

    use super::{initialize, lock_connection};

    #[test]
    fn initialize_creates_transaction_table() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");

        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn initialize_twice_succeeds() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");
        let result = initialize(&conn);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn unicode_lower_folds_non_ascii_letters() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).expect("Could not initialize database");

        let got: String = conn
            .query_row("SELECT unicode_lower('CRÈME Brûlée ÉCLAIR')", [], |row| {
                row.get(0)
            })
            .unwrap();

        assert_eq!(got, "crème brûlée éclair");
    }

    #[test]
    fn lock_fails_on_poisoned_mutex() {
        let connection = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let poisoner = connection.clone();

        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(
            lock_connection(&connection),
            Err(Error::DatabaseLockError)
        ));
    }
}
