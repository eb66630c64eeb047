use anyhow::{bail, Context};
use clap::Parser;
use hotel_reservations::config::cli::{Command, CustomerCommand, HotelCommand, ReservationCommand};
use hotel_reservations::core::ConfigProvider;
use hotel_reservations::utils::logger;
use hotel_reservations::utils::validation::parse_iso_date;
use hotel_reservations::{
    CliConfig, CustomerId, CustomerUpdate, HotelId, HotelUpdate, LocalStorage, ReservationError,
    ReservationId, ReservationSystem,
};
use serde::Serialize;

fn main() {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.json_logs() {
        logger::init_json_logger(settings.verbose());
    } else {
        logger::init_cli_logger(settings.verbose());
    }
    tracing::debug!("Settings: {:?}", settings);

    let result = ReservationSystem::open(&settings)
        .map_err(anyhow::Error::from)
        .and_then(|system| run(&system, cli.command));

    if let Err(e) = result {
        match e.downcast_ref::<ReservationError>() {
            Some(err) => {
                tracing::error!("❌ {} (category: {:?})", err, err.category());
                eprintln!("❌ {}", err.user_friendly_message());
            }
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(system: &ReservationSystem<LocalStorage>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Hotel(command) => run_hotel(system, command),
        Command::Customer(command) => run_customer(system, command),
        Command::Reservation(command) => run_reservation(system, command),
    }
}

fn run_hotel(system: &ReservationSystem<LocalStorage>, command: HotelCommand) -> anyhow::Result<()> {
    match command {
        HotelCommand::Create { name, rooms } => print_json(&system.hotels().create(&name, rooms)?),
        HotelCommand::Get { id } => {
            let id = HotelId::parse(&id)?;
            match system.hotels().get(&id) {
                Some(hotel) => print_json(&hotel),
                None => bail!("hotel {} not found", id),
            }
        }
        HotelCommand::List => print_json(&system.hotels().list()),
        HotelCommand::Update { id, name, rooms } => {
            let id = HotelId::parse(&id)?;
            let update = HotelUpdate {
                name,
                total_rooms: rooms,
            };
            match system.update_hotel(&id, &update)? {
                Some(hotel) => print_json(&hotel),
                None => bail!("hotel {} not found", id),
            }
        }
        HotelCommand::Delete { id } => {
            let id = HotelId::parse(&id)?;
            if !system.delete_hotel(&id)? {
                bail!("hotel {} not found", id);
            }
            println!("✅ Deleted hotel {}", id);
            Ok(())
        }
    }
}

fn run_customer(
    system: &ReservationSystem<LocalStorage>,
    command: CustomerCommand,
) -> anyhow::Result<()> {
    match command {
        CustomerCommand::Create { name, email } => {
            print_json(&system.customers().create(&name, &email)?)
        }
        CustomerCommand::Get { id } => {
            let id = CustomerId::parse(&id)?;
            match system.customers().get(&id) {
                Some(customer) => print_json(&customer),
                None => bail!("customer {} not found", id),
            }
        }
        CustomerCommand::List => print_json(&system.customers().list()),
        CustomerCommand::Update { id, name, email } => {
            let id = CustomerId::parse(&id)?;
            match system.customers().update(&id, &CustomerUpdate { name, email })? {
                Some(customer) => print_json(&customer),
                None => bail!("customer {} not found", id),
            }
        }
        CustomerCommand::Delete { id } => {
            let id = CustomerId::parse(&id)?;
            if !system.delete_customer(&id)? {
                bail!("customer {} not found", id);
            }
            println!("✅ Deleted customer {}", id);
            Ok(())
        }
    }
}

fn run_reservation(
    system: &ReservationSystem<LocalStorage>,
    command: ReservationCommand,
) -> anyhow::Result<()> {
    let reservations = system.reservations();
    match command {
        ReservationCommand::Create {
            customer,
            hotel,
            check_in,
            check_out,
        } => {
            let reservation = reservations.create(
                &CustomerId::parse(&customer)?,
                &HotelId::parse(&hotel)?,
                parse_iso_date(&check_in).context("invalid --check-in")?,
                parse_iso_date(&check_out).context("invalid --check-out")?,
            )?;
            print_json(&reservation)
        }
        ReservationCommand::Get { id } => {
            let id = ReservationId::parse(&id)?;
            match reservations.get(&id) {
                Some(reservation) => print_json(&reservation),
                None => bail!("reservation {} not found", id),
            }
        }
        ReservationCommand::List { hotel, customer } => {
            let found = match (hotel, customer) {
                (Some(hotel), _) => reservations.list_for_hotel(&HotelId::parse(&hotel)?),
                (None, Some(customer)) => {
                    reservations.list_for_customer(&CustomerId::parse(&customer)?)
                }
                (None, None) => reservations.list(),
            };
            print_json(&found)
        }
        ReservationCommand::Cancel { id } => {
            let id = ReservationId::parse(&id)?;
            if !reservations.cancel(&id)? {
                bail!("reservation {} not found", id);
            }
            println!("✅ Cancelled reservation {}", id);
            Ok(())
        }
        ReservationCommand::Availability {
            hotel,
            check_in,
            check_out,
        } => {
            let free = reservations.availability(
                &HotelId::parse(&hotel)?,
                parse_iso_date(&check_in).context("invalid --check-in")?,
                parse_iso_date(&check_out).context("invalid --check-out")?,
            )?;
            println!("{}", free);
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
