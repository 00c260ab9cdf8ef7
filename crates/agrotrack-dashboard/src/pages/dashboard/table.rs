use leptos::*;

use crate::view::TableRow;

/// One row per record, in fetch order.
#[component]
pub fn TelemetryTable(rows: Vec<TableRow>) -> impl IntoView {
    view! {
        <div class="table">
            <table>
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Equipment"</th>
                        <th>"Timestamp"</th>
                        <th>"Latitude"</th>
                        <th>"Longitude"</th>
                        <th>"RPM"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows.into_iter().map(|row| view! {
                        <tr>
                            <td>{row.id}</td>
                            <td>{row.equipment_id}</td>
                            <td>{row.timestamp}</td>
                            <td>{row.latitude}</td>
                            <td>{row.longitude}</td>
                            <td>{row.engine_rpm}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}
