use colored::*;
use std::io::{self, BufRead, Write};

use fleet_maintenance::client::{FleetApiClient, DEFAULT_API_BASE_URL};
use fleet_maintenance::dto::vehicle_dto::CreateVehicleRequest;
use fleet_maintenance::views::fleet_view::{load_summary, AlertBadge, AlertLine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("{}", "🚛 Fleet Maintenance Console".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    let base_url = std::env::var("FLEET_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let client = FleetApiClient::new(base_url);
    println!("🌐 API: {}", client.base_url().bright_white());

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Listar vehículos");
        println!("2. ➕ Registrar vehículo");
        println!("3. 🛣️  Actualizar kilometraje");
        println!("4. 🔔 Ver alertas de un vehículo");
        println!("5. 🗑️  Eliminar vehículo");
        println!("6. 🚪 Salir");

        let choice = match prompt("Selecciona una opción (1-6): ") {
            Ok(choice) => choice,
            // Fin de la entrada estándar: salir en lugar de repetir el menú
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                println!();
                println!("{}", "👋 Entrada cerrada, ¡hasta luego!".bright_green());
                break;
            }
            Err(e) => return Err(e.into()),
        };

        // Los errores de la API se muestran y se vuelve al menú
        let result = match choice.as_str() {
            "1" => list_vehicles(&client).await,
            "2" => register_vehicle(&client).await,
            "3" => update_mileage(&client).await,
            "4" => show_alerts(&client).await,
            "5" => delete_vehicle(&client).await,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

/// Leer una línea; 0 bytes leídos significa que la entrada se cerró
fn read_answer<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "entrada estándar cerrada"));
    }
    Ok(input.trim().to_string())
}

fn prompt_mileage(label: &str) -> anyhow::Result<i64> {
    let raw = prompt(label)?;
    raw.parse::<i64>()
        .map_err(|_| anyhow::anyhow!("'{}' no es un kilometraje válido", raw))
}

async fn list_vehicles(client: &FleetApiClient) -> anyhow::Result<()> {
    let summary = load_summary(client).await?;

    println!();
    println!("{}", "🚗 FLOTA".bright_cyan().bold());
    println!(
        "Vehículos: {}   Alertas: {}",
        summary.total_vehicles.to_string().bright_white().bold(),
        summary.total_alerts.to_string().bright_white().bold()
    );

    if summary.is_empty() {
        println!("{}", "No hay vehículos registrados".dimmed());
        return Ok(());
    }

    for card in &summary.vehicles {
        let alerts = format!("{} alertas", card.alert_count);
        let badge = match card.badge {
            AlertBadge::Success => alerts.bright_green(),
            AlertBadge::Warning => alerts.bright_yellow(),
            AlertBadge::Error => alerts.bright_red(),
        };
        println!(
            "  {} {} | {} | {} km | {}",
            card.id.bright_white().bold(),
            card.plate,
            card.model,
            card.current_mileage,
            badge
        );
    }

    Ok(())
}

async fn register_vehicle(client: &FleetApiClient) -> anyhow::Result<()> {
    println!("{}", "➕ NUEVO VEHÍCULO".bright_cyan().bold());

    let request = CreateVehicleRequest {
        id: prompt("ID (ej: V-001): ")?,
        plate: prompt("Placa (ej: ABC-123): ")?.to_uppercase(),
        model: prompt("Modelo: ")?,
        initial_mileage: prompt_mileage("Kilometraje inicial: ")?,
    };

    let created = client.create_vehicle(&request).await?;
    println!("{}", "✅ Vehículo registrado".bright_green().bold());
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

async fn update_mileage(client: &FleetApiClient) -> anyhow::Result<()> {
    let vehicle_id = prompt("ID del vehículo: ")?;
    let vehicle = client.get_vehicle(&vehicle_id).await?;
    println!("Kilometraje actual: {} km", vehicle.current_mileage.to_string().bright_white());

    let new_mileage = prompt_mileage("Nuevo kilometraje: ")?;
    if new_mileage <= vehicle.current_mileage {
        println!(
            "{}",
            "⚠️ El nuevo kilometraje debe ser mayor al actual".bright_yellow()
        );
        return Ok(());
    }

    let previous_alerts = vehicle.alert_count();
    let updated = client.update_mileage(&vehicle_id, new_mileage).await?;
    println!("{}", "✅ Kilometraje actualizado".bright_green().bold());

    for alert in updated.alerts.iter().skip(previous_alerts) {
        let line = AlertLine::from(alert);
        println!("  🔔 {} a los {} km", line.label.bright_yellow(), line.mileage);
    }
    Ok(())
}

async fn show_alerts(client: &FleetApiClient) -> anyhow::Result<()> {
    let vehicle_id = prompt("ID del vehículo: ")?;
    let alerts = client.get_vehicle_alerts(&vehicle_id).await?;

    println!("{}", format!("🔔 ALERTAS DE {}", vehicle_id).bright_cyan().bold());
    if alerts.is_empty() {
        println!("{}", "Sin alertas de mantenimiento".dimmed());
        return Ok(());
    }

    for line in alerts.iter().map(AlertLine::from) {
        println!(
            "  [{}] {} - {} km ({})",
            line.alert_type.as_str().bright_white().bold(),
            line.label,
            line.mileage,
            line.timestamp.dimmed()
        );
    }
    Ok(())
}

async fn delete_vehicle(client: &FleetApiClient) -> anyhow::Result<()> {
    let vehicle_id = prompt("ID del vehículo a eliminar: ")?;
    let confirm = prompt(&format!("¿Eliminar {} y todas sus alertas? (s/N): ", vehicle_id))?;

    if !confirm.eq_ignore_ascii_case("s") {
        println!("{}", "Operación cancelada".dimmed());
        return Ok(());
    }

    client.delete_vehicle(&vehicle_id).await?;
    println!("{}", "✅ Vehículo eliminado".bright_green().bold());
    Ok(())
}
