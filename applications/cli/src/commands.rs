//! Command handlers. Each runs against an already signed-in [`AppState`].

use crate::{TripCommands, UserCommands};
use anyhow::{bail, Context};
use rider_client::{AppState, TripFilter};
use rider_core::validation::{TripForm, UserForm};
use rider_core::{Navigation, Role, Trip, User, UserId};

pub async fn sign_up(app: &AppState, email: &str, password: &str) -> anyhow::Result<()> {
    let new_user = UserForm {
        email: email.to_string(),
        password: password.to_string(),
        role: Role::User,
    }
    .validate()?;

    let user = app.client().sign_up(&new_user).await?;
    println!("Account created: {}", format_user(&user));
    Ok(())
}

pub async fn whoami(app: &AppState) -> anyhow::Result<()> {
    let session = app.session().await;
    let Some(me) = session.user() else {
        bail!("Not signed in");
    };

    println!("{} <{}> ({})", me.id, me.email, me.role);

    let roles: Vec<&str> = app
        .preferences()
        .await
        .available_role_options(&session)
        .iter()
        .map(|option| option.text)
        .collect();
    if !roles.is_empty() {
        println!("May assign roles: {}", roles.join(", "));
    }

    Ok(())
}

pub async fn users(app: &AppState, command: UserCommands) -> anyhow::Result<()> {
    if let Navigation::Redirect(to) = app.check_privileged().await {
        println!("Access denied, redirected to {}", to);
        return Ok(());
    }

    match command {
        UserCommands::List { page } => {
            app.users().list().await?;

            let session = app.session().await;
            let visible = app.users().visible_users(&session).await;
            let preferences = app.preferences().await;

            for user in preferences.page(&visible, page) {
                println!("  {}", format_user(user));
            }
            print_page_footer(page, preferences.page_count(visible.len()), visible.len());
        }
        UserCommands::Show { id } => {
            let user = app.users().retrieve(id).await?;
            println!("{}", format_user(&user));
        }
        UserCommands::Create {
            email,
            password,
            role,
        } => {
            ensure_assignable(app, role).await?;

            let new_user = UserForm {
                email,
                password,
                role,
            }
            .validate()?;
            let user = app.users().create(&new_user).await?;
            println!("Created {}", format_user(&user));
        }
        UserCommands::Update {
            id,
            email,
            role,
            password,
        } => {
            let mut user = app.users().retrieve(id).await?;
            if let Some(email) = email {
                user.email = email;
            }
            if let Some(role) = role {
                ensure_assignable(app, role).await?;
                user.role = role;
            }
            if let Some(password) = password {
                user.password = password;
            }

            let user = app.users().update(&user).await?;
            println!("Updated {}", format_user(&user));
        }
        UserCommands::Delete { id } => {
            app.users().destroy(id).await?;
            println!("Deleted user {}", id);
        }
    }

    Ok(())
}

pub async fn trips(app: &AppState, command: TripCommands) -> anyhow::Result<()> {
    match command {
        TripCommands::List {
            user,
            page,
            destination,
            search,
            from,
            to,
        } => {
            let owner = owner(app, user).await?;
            let filter = TripFilter {
                destination,
                destination_contains: search,
                start_date_lte: to,
                end_date_gte: from,
                ..TripFilter::default()
            };

            let mut trips = app.trips().search(owner, &filter).await?;
            trips.sort_by_key(|t| (t.start_date, t.id));

            let preferences = app.preferences().await;
            for trip in preferences.page(&trips, page) {
                println!("  {}", format_trip(trip));
            }
            print_page_footer(page, preferences.page_count(trips.len()), trips.len());
        }
        TripCommands::Show { id, user } => {
            let owner = owner(app, user).await?;
            let trip = app.trips().retrieve(owner, id).await?;
            println!("{}", format_trip(&trip));
        }
        TripCommands::Create {
            user,
            destination,
            start,
            end,
            comment,
        } => {
            let owner = owner(app, user).await?;
            let new_trip = TripForm {
                destination,
                start_date: start,
                end_date: end,
                comment,
            }
            .validate()?;

            let trip = app.trips().create(owner, &new_trip).await?;
            println!("Booked {}", format_trip(&trip));
        }
        TripCommands::Update {
            id,
            user,
            destination,
            start,
            end,
            comment,
        } => {
            let owner = owner(app, user).await?;
            let mut trip = app.trips().retrieve(owner, id).await?;
            if let Some(destination) = destination {
                trip.destination = destination;
            }
            if let Some(start) = start {
                trip.start_date = start;
            }
            if let Some(end) = end {
                trip.end_date = end;
            }
            if let Some(comment) = comment {
                trip.comment = Some(comment).filter(|c| !c.trim().is_empty());
            }

            let trip = app.trips().update(owner, &trip).await?;
            println!("Updated {}", format_trip(&trip));
        }
        TripCommands::Delete { id, user } => {
            let owner = owner(app, user).await?;
            app.trips().destroy(owner, id).await?;
            println!("Cancelled trip {}", id);
        }
    }

    Ok(())
}

/// Trip owner: the explicit `--user`, or the signed-in user
async fn owner(app: &AppState, user: Option<UserId>) -> anyhow::Result<UserId> {
    match user {
        Some(id) => Ok(id),
        None => app
            .session()
            .await
            .user_id()
            .context("Not signed in"),
    }
}

async fn ensure_assignable(app: &AppState, role: Role) -> anyhow::Result<()> {
    let session = app.session().await;
    let allowed = app
        .preferences()
        .await
        .available_role_options(&session)
        .iter()
        .any(|option| option.value == role);

    if !allowed {
        bail!("You may not assign the {} role", role);
    }
    Ok(())
}

fn format_user(user: &User) -> String {
    format!("{} <{}> ({})", user.id, user.email, user.role)
}

fn format_trip(trip: &Trip) -> String {
    let mut line = format!(
        "#{} {}: {} to {} ({} days)",
        trip.id,
        trip.destination,
        trip.start_date,
        trip.end_date,
        trip.duration_days()
    );
    if let Some(comment) = &trip.comment {
        line.push_str(" - ");
        line.push_str(comment);
    }
    line
}

fn print_page_footer(page: usize, pages: usize, total: usize) {
    if total == 0 {
        println!("Nothing found");
    } else {
        println!("Page {} of {} ({} total)", page.max(1), pages, total);
    }
}
