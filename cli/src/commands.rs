use std::sync::Arc;

use anyhow::{bail, Context, Result};
use client::api::{auth_api, points_api, routes_api, schedule_api, trucks_api};
use client::{
    ApiClient, FileStorage, Identity, Navigator, Preferences, ScheduleBoard, Session, Storage,
    TokenStore,
};
use secrecy::SecretString;
use shared::{ItineraryStatus, NewCollectionPoint, NewItinerary, NewRoute, NewTruck, TokenResponse};
use tracing::{info, warn};

use crate::config::{
    Command, Config, PointCommand, RouteCommand, ScheduleCommand, ThemeCommand, TruckCommand,
};
use crate::render;

/// Logging out always lands back at the entry point: a fresh `login`.
struct ResetToStart;

impl Navigator for ResetToStart {
    fn navigate_to_root(&self) {
        println!("Signed out. Run `greenlog login` to start a new session.");
    }
}

struct Shell {
    client: ApiClient,
    session: Session,
    preferences: Preferences,
}

pub async fn run(config: Config) -> Result<()> {
    let data_dir = config.data_dir()?;
    info!(data_dir = %data_dir.display(), api_url = %config.api_url, "Opening client state");
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(data_dir));
    let tokens = TokenStore::new(storage.clone());
    let shell = Shell {
        client: ApiClient::new(config.api_url.clone(), tokens.clone()),
        session: Session::restore(tokens, Arc::new(ResetToStart)),
        preferences: Preferences::new(storage),
    };

    match config.command {
        Command::Login { email, password } => {
            shell.login(&email, SecretString::from(password)).await
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            shell
                .register(&name, &email, SecretString::from(password))
                .await
        }
        Command::Logout => {
            shell.session.logout();
            Ok(())
        }
        Command::Whoami => {
            let user = shell.require_session()?;
            render::identity(&user);
            Ok(())
        }
        Command::Trucks(command) => shell.trucks(command).await,
        Command::Points(command) => shell.points(command).await,
        Command::Routes(command) => shell.routes(command).await,
        Command::Schedule(command) => shell.schedule(command).await,
        Command::Theme(command) => shell.theme(command),
    }
}

/// Only a refused credential is reported as bad credentials.
fn sign_in_failure(error: client::Error) -> anyhow::Error {
    let message = if error.is_credentials_rejected() {
        "Invalid credentials"
    } else {
        "Fail to sign in"
    };
    anyhow::Error::new(error).context(message)
}

impl Shell {
    /// Protected views need both a session and a stored token.
    fn require_session(&self) -> Result<Identity> {
        match self.session.current_user() {
            Some(user) if self.client.tokens().read().is_some() => Ok(user),
            _ => bail!("Not signed in. Run `greenlog login` first."),
        }
    }

    /// Ends the session when the backend refused the credential.
    fn checked<T>(&self, result: client::Result<T>) -> Result<T> {
        match result {
            Err(error) if error.is_credentials_rejected() => {
                warn!(error = %error, "Backend rejected the session");
                eprintln!("Your session expired. Sign in again.");
                self.session.logout();
                Err(error.into())
            }
            other => Ok(other?),
        }
    }

    fn start_session(&self, response: TokenResponse) -> Result<()> {
        self.client
            .tokens()
            .save(&response.token)
            .context("Fail to store the session token")?;
        if !self.session.login(&response.token) {
            bail!("The backend answered with a token that carries no usable identity");
        }
        if let Some(user) = self.session.current_user() {
            render::identity(&user);
        }
        Ok(())
    }

    async fn login(&self, email: &str, password: SecretString) -> Result<()> {
        let response = auth_api::login(&self.client, email, password)
            .await
            .map_err(sign_in_failure)?;
        self.start_session(response)
    }

    async fn register(&self, name: &str, email: &str, password: SecretString) -> Result<()> {
        let response = auth_api::register(&self.client, name, email, password)
            .await
            .context("Fail to create the account")?;
        println!("Account created.");
        self.start_session(response)
    }

    async fn trucks(&self, command: TruckCommand) -> Result<()> {
        self.require_session()?;
        match command {
            TruckCommand::List => {
                let trucks = self.checked(trucks_api::list(&self.client).await)?;
                render::trucks(&trucks);
            }
            TruckCommand::Add {
                plate,
                driver,
                capacity,
                waste_types,
            } => {
                let waste_types = if waste_types.is_empty() {
                    NewTruck::DEFAULT_WASTE_TYPES.to_vec()
                } else {
                    waste_types
                };
                let truck = NewTruck {
                    plate,
                    driver_name: driver,
                    capacity,
                    waste_types,
                };
                self.checked(trucks_api::create(&self.client, &truck).await)?;
                println!("Truck {} registered.", truck.plate);
            }
            TruckCommand::Remove { id } => {
                self.checked(trucks_api::remove(&self.client, id).await)?;
                println!("Truck {id} removed.");
            }
        }
        Ok(())
    }

    async fn points(&self, command: PointCommand) -> Result<()> {
        self.require_session()?;
        match command {
            PointCommand::List => {
                let points = self.checked(points_api::list(&self.client).await)?;
                render::points(&points);
            }
            PointCommand::Add {
                name,
                address,
                responsible,
                contact,
                waste_types,
            } => {
                let point = NewCollectionPoint {
                    name,
                    address,
                    responsible,
                    contact,
                    waste_types,
                };
                self.checked(points_api::create(&self.client, &point).await)?;
                println!("Collection point {} created.", point.name);
            }
            PointCommand::Remove { id } => {
                self.checked(points_api::remove(&self.client, id).await)?;
                println!("Collection point {id} removed.");
            }
        }
        Ok(())
    }

    async fn routes(&self, command: RouteCommand) -> Result<()> {
        self.require_session()?;
        match command {
            RouteCommand::List => {
                let routes = self.checked(routes_api::list(&self.client).await)?;
                render::routes(&routes);
            }
            RouteCommand::Add {
                name,
                distance_km,
                point_ids,
            } => {
                let route = NewRoute {
                    name,
                    distance_km,
                    point_ids,
                };
                self.checked(routes_api::create(&self.client, &route).await)?;
                println!("Route {} created.", route.name);
            }
            RouteCommand::Remove { id } => {
                self.checked(routes_api::remove(&self.client, id).await)?;
                println!("Route {id} removed.");
            }
        }
        Ok(())
    }

    async fn schedule(&self, command: ScheduleCommand) -> Result<()> {
        self.require_session()?;
        let (id, target) = match command {
            ScheduleCommand::List => {
                let mut board = ScheduleBoard::new(self.client.clone());
                let itineraries = self.checked(board.list_schedule().await.map(<[_]>::to_vec))?;
                render::schedule(&itineraries);
                return Ok(());
            }
            ScheduleCommand::Create { truck, route, date } => {
                let itinerary = NewItinerary {
                    truck_id: truck,
                    route_id: route,
                    date,
                };
                self.checked(schedule_api::create_itinerary(&self.client, &itinerary).await)?;
                println!("Itinerary scheduled for {}.", date.format("%d/%m/%Y"));
                return Ok(());
            }
            ScheduleCommand::Start { id } => (id, ItineraryStatus::InProgress),
            ScheduleCommand::Finish { id } => (id, ItineraryStatus::Completed),
            ScheduleCommand::SetStatus { id, status } => (id, status),
        };

        let mut board = ScheduleBoard::new(self.client.clone());
        self.checked(board.list_schedule().await.map(|_| ()))?;
        let itineraries = self.checked(board.advance_status(id, target).await.map(<[_]>::to_vec))?;
        println!("Itinerary #{id} is now {target}.");
        render::schedule(&itineraries);
        Ok(())
    }

    fn theme(&self, command: ThemeCommand) -> Result<()> {
        let theme = match command {
            ThemeCommand::Show => self.preferences.theme(),
            ThemeCommand::Toggle => self.preferences.toggle_theme()?,
            ThemeCommand::Set { theme } => {
                self.preferences.set_theme(theme)?;
                theme
            }
        };
        println!("Theme: {theme}");
        Ok(())
    }
}
