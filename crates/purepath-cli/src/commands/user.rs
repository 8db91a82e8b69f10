use chrono::Utc;
use purepath_core::{Database, Event, StatsStore, User};

use super::{print_json, CmdResult};

pub fn login(name: Option<String>, email: Option<String>) -> CmdResult {
    let db = Database::open()?;
    let store = StatsStore::new(&db);
    let user = match name {
        Some(name) => User::named(&name, email),
        None => User::guest(),
    };
    store.save_user(&user)?;
    print_json(&user.signed_in_event(Utc::now()))
}

pub fn whoami() -> CmdResult {
    let db = Database::open()?;
    match StatsStore::new(&db).load_user()? {
        Some(user) => print_json(&user),
        None => Err("not signed in (run `purepath login`)".into()),
    }
}

pub fn logout() -> CmdResult {
    let db = Database::open()?;
    StatsStore::new(&db).clear_user()?;
    print_json(&Event::UserSignedOut { at: Utc::now() })
}
