use anyhow::Result;
use colored::*;
use serde_json::Value;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🔧 Garage Gateway Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: URL del gateway
    let base_url = prompt_with_default("Gateway URL", "http://localhost:3000")?;
    let client = reqwest::Client::new();

    // Paso 2: comprobar que responde
    call(&client, reqwest::Method::GET, &format!("{}/health", base_url)).await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Listar voitures");
        println!("2. 🚙 Ficha completa de una voiture");
        println!("3. 📜 Historial de estados de una panne");
        println!("4. 💶 Estado de pago de una panne");
        println!("5. ✅ ¿Panne resuelta?");
        println!("6. 🛠️ Marcar panne como reparada");
        println!("7. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-7): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let (method, path) = match choice.trim() {
            "1" => (reqwest::Method::GET, "/voitures".to_string()),
            "2" => {
                let id = prompt("idVoiture")?;
                (reqwest::Method::GET, format!("/voitures/{}/complete", id))
            }
            "3" => {
                let id = prompt("idPanne")?;
                (reqwest::Method::GET, format!("/pannes/{}/statuts", id))
            }
            "4" => {
                let id = prompt("idPanne")?;
                (reqwest::Method::GET, format!("/pannes/{}/paiement", id))
            }
            "5" => {
                let id = prompt("idPanne")?;
                (reqwest::Method::GET, format!("/pannes/{}/est-reparee", id))
            }
            "6" => {
                let id = prompt("idPanne")?;
                (reqwest::Method::POST, format!("/pannes/{}/statut", id))
            }
            "7" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = call(&client, method, &format!("{}{}", base_url, path)).await {
            println!("{}", format!("❌ Error de red: {}", e).bright_red());
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", format!("{}: ", label).bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn prompt_with_default(label: &str, default: &str) -> Result<String> {
    let value = prompt(&format!("{} [{}]", label, default))?;
    if value.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(value.trim_end_matches('/').to_string())
    }
}

async fn call(client: &reqwest::Client, method: reqwest::Method, url: &str) -> Result<()> {
    println!();
    println!("{}", format!("📤 {} {}", method, url).bright_blue());

    let response = client.request(method, url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    let status_line = format!("📥 Status: {}", status);
    if status.is_success() {
        println!("{}", status_line.bright_green().bold());
    } else {
        println!("{}", status_line.bright_red().bold());
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", body),
    }

    Ok(())
}
