//! Notification templates for new orders.
//!
//! The chat message uses Telegram's legacy Markdown; the email is inline-styled
//! HTML. Customer-supplied text is escaped for each target.

use std::fmt::Write;

use crate::config::BRAND_NAME;
use crate::domain::money::format_amount;
use crate::domain::{CartItem, PaymentMethod, PaymentSubmission};

const NOT_AVAILABLE: &str = "N/A";
const SEPARATOR: &str = "------------------------------------------------";

/// Escape the characters that legacy Markdown treats as markup.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape text for an HTML body.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Text placed inside a `*bold*` or `` `code` `` entity.
///
/// Backslash escapes are shown literally inside entities, so the entity
/// delimiters are dropped instead.
pub fn entity_text(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '*' | '`')).collect()
}

fn md(value: Option<&String>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| escape_markdown(v))
}

fn md_entity(value: Option<&String>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| entity_text(v))
}

fn html(value: Option<&String>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| escape_html(v))
}

/// Operator-facing chat message announcing a new order.
pub fn order_chat_message(order: &PaymentSubmission, reference: &str) -> String {
    let wallet_recharge = order.is_wallet_recharge();
    let mut text = if wallet_recharge {
        format!("💸 Nueva Recarga de Billetera {BRAND_NAME} 💸\n\n")
    } else {
        format!("✨ Nueva Recarga (CARRITO) {BRAND_NAME} ✨\n\n")
    };

    let _ = writeln!(text, "*ID de Transacción:* `{reference}`");
    let _ = writeln!(text, "*Estado:* `PENDIENTE`");

    if let (true, Some(first)) = (wallet_recharge, order.first_item()) {
        if let Some(google_id) = &first.google_id {
            let _ = writeln!(text, "🔗 *Google ID (Billetera):* `{}`", entity_text(google_id));
            let _ = writeln!(
                text,
                "💵 *Monto Recargado (Paquete):* *{}*",
                md_entity(first.package_name.as_ref())
            );
        }
    }
    let _ = writeln!(text, "{SEPARATOR}");

    let currency = order.display_currency();
    for (index, item) in order.items.iter().enumerate() {
        let _ = writeln!(text, "*📦 Producto {}:*", index + 1);
        let _ = writeln!(text, "🎮 Juego/Servicio: *{}*", md_entity(item.game.as_ref()));
        let _ = writeln!(text, "📦 Paquete: *{}*", md_entity(item.package_name.as_ref()));
        write_item_credentials(&mut text, item);

        if let Some(price) = item.price_for(currency) {
            let _ = writeln!(
                text,
                "💲 Precio (Est.): {} {}",
                format_amount(price),
                escape_markdown(&order.currency)
            );
        }
        let _ = writeln!(text, "{SEPARATOR}");
    }

    let _ = writeln!(text, "\n*RESUMEN DE PAGO*");
    let _ = writeln!(
        text,
        "💰 *TOTAL A PAGAR:* *{} {}*",
        entity_text(&order.final_price_text),
        entity_text(&order.currency)
    );
    let _ = writeln!(text, "💳 Método de Pago: *{}*", entity_text(&order.method.label()));
    let _ = writeln!(text, "📧 Correo Cliente: {}", escape_markdown(&order.email));

    if let Some(raw) = &order.whatsapp_raw {
        let _ = writeln!(text, "📱 WhatsApp Cliente: {}", escape_markdown(raw));
        if let Some(normalized) = order.whatsapp_normalized.as_ref().filter(|n| *n != raw) {
            let _ = writeln!(text, "(Número normalizado: {normalized})");
        }
    }

    let details = &order.method_details;
    match order.method {
        PaymentMethod::PagoMovil => {
            let _ = writeln!(text, "📞 Teléfono Pago Móvil: {}", md(details.phone.as_ref()));
            let _ = writeln!(text, "📊 Referencia Pago Móvil: {}", md(details.reference.as_ref()));
        }
        PaymentMethod::Binance => {
            let _ = writeln!(text, "🆔 TXID Binance: {}", md(details.txid.as_ref()));
        }
        PaymentMethod::Zinli => {
            let _ = writeln!(text, "📊 Referencia Zinli: {}", md(details.reference.as_ref()));
        }
        PaymentMethod::Other(_) => {}
    }

    text
}

fn write_item_credentials(text: &mut String, item: &CartItem) {
    if item.is_roblox() {
        let _ = writeln!(text, "📧 Correo Roblox: {}", md(item.roblox_email.as_ref()));
        let _ = writeln!(text, "🔑 Contraseña Roblox: {}", md(item.roblox_password.as_ref()));
    } else if item.is_codm() {
        let _ = writeln!(text, "📧 Correo CODM: {}", md(item.codm_email.as_ref()));
        let _ = writeln!(text, "🔑 Contraseña CODM: {}", md(item.codm_password.as_ref()));
        let _ = writeln!(text, "🔗 Vinculación CODM: {}", md(item.codm_vinculation.as_ref()));
    } else if let Some(player_id) = &item.player_id {
        let _ = writeln!(text, "👤 ID de Jugador: *{}*", entity_text(player_id));
    }
}

/// Caption attached to the uploaded receipt.
pub fn receipt_caption(order: &PaymentSubmission, reference: &str) -> String {
    format!(
        "*Comprobante de Pago* para Transacción `{reference}`\n\n*Método:* {}\n*Monto:* {} {}",
        escape_markdown(&order.method.label()),
        escape_markdown(&order.final_price_text),
        escape_markdown(&order.currency)
    )
}

/// Subject of the customer confirmation email.
pub fn order_email_subject(reference: &str) -> String {
    format!("🎉 Tu Solicitud de Recarga (Pedido #{reference}) con {BRAND_NAME} ha sido Recibida! 🎉")
}

/// Customer confirmation email body.
pub fn order_email_html(order: &PaymentSubmission, reference: &str, support_whatsapp: &str) -> String {
    let mut items = String::new();
    for (index, item) in order.items.iter().enumerate() {
        let game = item.game.as_deref().map_or_else(|| "Servicio".to_string(), escape_html);
        let package = item
            .package_name
            .as_deref()
            .map_or_else(|| "Paquete Desconocido".to_string(), escape_html);

        let details = if item.is_roblox() {
            format!(
                "<li><strong>Correo de Roblox:</strong> {}</li>\
                 <li><strong>Contraseña de Roblox:</strong> {}</li>",
                html(item.roblox_email.as_ref()),
                html(item.roblox_password.as_ref())
            )
        } else if item.is_codm() {
            format!(
                "<li><strong>Correo de CODM:</strong> {}</li>\
                 <li><strong>Contraseña de CODM:</strong> {}</li>\
                 <li><strong>Vinculación de CODM:</strong> {}</li>",
                html(item.codm_email.as_ref()),
                html(item.codm_password.as_ref()),
                html(item.codm_vinculation.as_ref())
            )
        } else if let (true, Some(google_id)) = (item.is_wallet_recharge(), &item.google_id) {
            format!(
                "<li><strong>ID de Google (Billetera):</strong> {}</li>\
                 <li><strong>Monto de Recarga (Paquete):</strong> {package}</li>",
                escape_html(google_id)
            )
        } else {
            item.player_id
                .as_ref()
                .map(|id| format!("<li><strong>ID de Jugador:</strong> {}</li>", escape_html(id)))
                .unwrap_or_default()
        };

        let _ = write!(
            items,
            r#"<div style="border: 1px solid #ddd; padding: 10px; margin-bottom: 10px; border-radius: 5px;">
<p style="margin-top: 0;"><strong>Producto {}: {game}</strong></p>
<ul style="list-style: none; padding: 0; margin: 0;">
<li><strong>Paquete:</strong> {package}</li>
{details}
</ul>
</div>
"#,
            index + 1
        );
    }

    let whatsapp = order
        .whatsapp_raw
        .as_ref()
        .map(|n| format!("<p><strong>Número de WhatsApp Proporcionado:</strong> {}</p>", escape_html(n)))
        .unwrap_or_default();

    format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
<h2 style="color: #007bff;">¡Hola!</h2>
<p>Hemos recibido tu solicitud de recarga (Pedido #{reference}).</p>
<h3 style="color: #007bff;">Detalles del Pedido:</h3>
{items}
<p><strong>Monto Total a Pagar:</strong> <span style="font-size: 1.1em; color: #d9534f; font-weight: bold;">{price} {currency}</span></p>
<p><strong>Método de Pago Seleccionado:</strong> {method}</p>
{whatsapp}
<p>Tu solicitud está actualmente en estado: <strong>PENDIENTE</strong>.</p>
<p>Estamos procesando tu recarga. Te enviaremos un <strong>correo de confirmación de la recarga completada y tu factura virtual una vez que tu recarga sea procesada</strong> por nuestro equipo.</p>
<p style="margin-top: 20px;">¡Gracias por confiar en {BRAND_NAME}!</p>
<p style="font-size: 0.9em; color: #777;">Si tienes alguna pregunta, contáctanos a través de nuestro WhatsApp: <a href="https://wa.me/{support_whatsapp}" style="color: #28a745; text-decoration: none;">+{support_whatsapp}</a></p>
</div>"#,
        price = escape_html(&order.final_price_text),
        currency = escape_html(&order.currency),
        method = escape_html(&order.method.label()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn order(cart: &str, method: &str) -> PaymentSubmission {
        let fields: HashMap<String, String> = [
            ("finalPrice", "12.00"),
            ("currency", "VES"),
            ("paymentMethod", method),
            ("email", "cliente@example.com"),
            ("whatsappNumber", "0414 123 4567"),
            ("reference", "998877"),
            ("cartDetails", cart),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        PaymentSubmission::from_fields(&fields).unwrap()
    }

    #[test]
    fn chat_message_lists_items_and_payment() {
        let text = order_chat_message(
            &order(
                r#"[{"game":"Free Fire","packageName":"100 Diamantes","playerId":"555_1","priceUSD":"1","priceVES":"38"},
                    {"game":"Roblox","packageName":"400 Robux","robloxEmail":"r@x.com"}]"#,
                "zinli",
            ),
            "MALOK-42",
        );

        assert!(text.starts_with("✨ Nueva Recarga (CARRITO) Malok Recargas ✨"));
        assert!(text.contains("*ID de Transacción:* `MALOK-42`"));
        assert!(text.contains("👤 ID de Jugador: *555_1*"));
        assert!(text.contains("💲 Precio (Est.): 38.00 VES"));
        assert!(text.contains("📧 Correo Roblox: r@x.com"));
        assert!(text.contains("🔑 Contraseña Roblox: N/A"));
        assert!(text.contains("💳 Método de Pago: *ZINLI*"));
        assert!(text.contains("📊 Referencia Zinli: 998877"));
        assert!(text.contains("(Número normalizado: 584141234567)"));
    }

    #[test]
    fn values_inside_entities_cannot_close_them() {
        let text = order_chat_message(
            &order(
                r#"[{"game":"Free*Fire","packageName":"100 `Diamantes`","playerId":"12*34_5"},
                    {"game":"Otro_Juego","packageName":"x"}]"#,
                "zinli",
            ),
            "MALOK-9",
        );

        assert!(text.contains("🎮 Juego/Servicio: *FreeFire*"));
        assert!(text.contains("📦 Paquete: *100 Diamantes*"));
        assert!(text.contains("👤 ID de Jugador: *1234_5*"));
        assert!(text.contains("🎮 Juego/Servicio: *Otro_Juego*"));
        // Outside entities the usual escaping still applies
        assert!(text.contains("📧 Correo Cliente: cliente@example.com"));
        assert_eq!(entity_text("a*b`c_d"), "abc_d");
    }

    #[test]
    fn wallet_recharge_gets_wallet_header() {
        let text = order_chat_message(
            &order(
                r#"[{"game":"Recarga de Saldo","packageName":"Saldo $10 USD","google_id":"g-9"}]"#,
                "pago-movil",
            ),
            "MALOK-1",
        );
        assert!(text.starts_with("💸 Nueva Recarga de Billetera"));
        assert!(text.contains("🔗 *Google ID (Billetera):* `g-9`"));
        assert!(text.contains("📊 Referencia Pago Móvil: 998877"));
        assert!(text.contains("📞 Teléfono Pago Móvil: N/A"));
    }

    #[test]
    fn email_escapes_customer_text() {
        let body = order_email_html(
            &order(r#"[{"game":"<b>Hack</b>","playerId":"1"}]"#, "binance"),
            "MALOK-7",
            "584143187185",
        );
        assert!(body.contains("&lt;b&gt;Hack&lt;/b&gt;"));
        assert!(body.contains("Pedido #MALOK-7"));
        assert!(body.contains("https://wa.me/584143187185"));
        assert!(order_email_subject("MALOK-7").contains("Pedido #MALOK-7"));
    }
}
