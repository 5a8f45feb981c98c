// Static browser shell. Renders whatever snapshot the service publishes and
// posts actions back; it keeps no state of its own beyond the map widget.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AIVISTA</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { margin: 0; font-family: Inter, Arial, sans-serif; background: #e2e2ec; }
  header { display: flex; justify-content: space-between; align-items: center; padding: 16px 24px; background: #1e1b4b; color: #fff; }
  header h1 { margin: 0; font-size: 22px; }
  header p { margin: 0; opacity: .8; }
  main { max-width: 1400px; margin: 40px auto; padding: 0 24px; }
  button { border: 0; border-radius: 8px; padding: 10px 14px; cursor: pointer; background: #4f46e5; color: #fff; font-size: 14px; }
  button.secondary { background: #fff; color: #1e1b4b; }
  button.active { outline: 3px solid #f59e0b; }
  .panel { background: #fff; border-radius: 14px; padding: 20px; }
  .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 32px; margin-top: 32px; }
  .buttons { display: flex; flex-wrap: wrap; gap: 12px; }
  .alert { background: #fee2e2; color: #991b1b; padding: 14px 18px; border-radius: 10px; margin-bottom: 20px; }
  .metrics { display: flex; gap: 20px; margin-top: 32px; }
  .metric { flex: 1; background: #fff; border-radius: 14px; padding: 18px; display: flex; flex-direction: column; gap: 6px; }
  .landing { min-height: 100vh; display: flex; align-items: center; justify-content: center; background: linear-gradient(135deg, #1e1b4b, #4f46e5); color: #fff; text-align: center; }
  #chart, #map { height: 340px; width: 100%; border-radius: 14px; }
  footer { display: flex; justify-content: space-between; padding: 20px 24px; color: #555; }
</style>
</head>
<body>
<div id="root"></div>
<script>
const root = document.getElementById("root");
let leaflet = null;
let layer = null;
let screen = null;

function el(tag, attrs, ...children) {
  const node = document.createElement(tag);
  for (const [key, value] of Object.entries(attrs || {})) {
    if (key === "onclick") node.onclick = value; else node.setAttribute(key, value);
  }
  for (const child of children) {
    node.append(child instanceof Node ? child : document.createTextNode(String(child)));
  }
  return node;
}

async function act(body) {
  const res = await fetch("/api/actions", {
    method: "POST",
    headers: { "content-type": "application/json" },
    body: JSON.stringify(body),
  });
  if (res.ok) render(await res.json());
}

async function info(topic) {
  const res = await fetch("/api/info/" + topic);
  const body = await res.json();
  alert(body.message || body.error);
}

function renderLanding(view) {
  leaflet = null;
  const topics = { "live-traffic": "Live Traffic", "route-planner": "Route Planner", "about": "About Us" };
  root.replaceChildren(el("div", { class: "landing" }, el("div", {},
    el("h1", {}, view.title),
    el("p", {}, view.tagline),
    el("div", { class: "buttons", style: "justify-content:center" },
      el("button", { onclick: () => act({ action: "enter-dashboard" }) }, "Go to Dashboard"),
      ...view.topics.map(t => el("button", { class: "secondary", onclick: () => info(t) }, topics[t] || t))),
    el("h3", {}, "Key Features"),
    el("ul", { style: "text-align:left" }, ...view.features.map(f => el("li", {}, f))))));
}

function renderDashboardShell(view) {
  root.replaceChildren(
    el("header", {},
      el("div", {}, el("h1", {}, view.header.brand), el("p", {}, view.header.subtitle)),
      el("button", { class: "secondary", onclick: () => act({ action: "show-front-page" }) }, "Front Page")),
    el("main", {},
      el("div", { id: "banner" }),
      el("section", { id: "controls", class: "buttons" }),
      el("section", { class: "grid" },
        el("div", { class: "panel" }, el("h3", {}, "Traffic Congestion Chart"), el("div", { id: "chart" }),
          el("div", { id: "kinds", class: "buttons", style: "margin-top:12px" })),
        el("div", { class: "panel" }, el("h3", {}, "City Map"),
          el("div", { class: "buttons", style: "margin-bottom:10px" },
            el("button", { onclick: () => act({ action: "recenter-map" }) }, "Reset Map")),
          el("div", { id: "map" }))),
      el("section", { id: "metrics", class: "metrics" })),
    el("footer", {}, el("div", {}, "© AIVISTA"), el("div", {}, "Built for sensor-first smart cities")));

  leaflet = L.map("map").setView([view.map.view.center.lat, view.map.view.center.lng], view.map.view.zoom);
  L.tileLayer(view.map.tile_url, { attribution: view.map.attribution }).addTo(leaflet);
  layer = L.layerGroup().addTo(leaflet);
  leaflet.on("dragend zoomend", (event) => {
    if (leaflet._syncing) return;
    const c = leaflet.getCenter();
    act({ action: "pan-map", center: { lat: c.lat, lng: c.lng }, zoom: leaflet.getZoom() });
  });
}

function renderControls(t) {
  const buttons = [
    ["toggle-pause", t.paused ? "Resume Updates" : "Pause Updates"],
    ["toggle-highlight", t.highlighted ? "Clear Highlights" : "Highlight Congestion"],
    ["toggle-map-mode", t.map_mode === "heatmap" ? "Show Markers" : "Show Heatmap"],
    ["toggle-prediction", t.prediction_mode ? "Show Current Data" : "Show Predictions"],
    ["toggle-signals", t.signals_enabled ? "Adaptive Signals ON" : "Adaptive Signals OFF"],
    ["trigger-emergency", "Trigger Emergency"],
  ];
  document.getElementById("controls").replaceChildren(
    ...buttons.map(([action, label]) => el("button", { onclick: () => act({ action }) }, label)));
}

function renderChart(chart) {
  const traces = chart.series.map(s => {
    const x = s.points.map(p => p.label);
    const y = s.points.map(p => p.value);
    switch (s.style.type) {
      case "line":
        return { x, y, type: "scatter", mode: "lines+markers", name: s.name,
          line: { color: s.color, width: s.style.width, dash: s.style.dashed ? "dashdot" : "solid" },
          marker: { size: s.style.marker_size } };
      case "bar":
        return { x, y, type: "bar", name: s.name, marker: { color: s.color } };
      default:
        return { labels: x, values: y, type: "pie", marker: { colors: s.style.palette } };
    }
  });
  Plotly.react("chart", traces, { title: chart.title, margin: { t: 40, l: 60, r: 24, b: 60 } });
  document.getElementById("kinds").replaceChildren(...["line", "bar", "pie"].map(kind =>
    el("button", { class: kind === chart.kind ? "active" : "", onclick: () => act({ action: "select-chart-kind", kind }) }, kind)));
}

function renderMap(map) {
  const c = leaflet.getCenter();
  if (c.lat !== map.view.center.lat || c.lng !== map.view.center.lng || leaflet.getZoom() !== map.view.zoom) {
    // Unanimated so the move/zoom events fire before the flag is cleared.
    leaflet._syncing = true;
    leaflet.setView([map.view.center.lat, map.view.center.lng], map.view.zoom, { animate: false });
    leaflet._syncing = false;
  }
  layer.clearLayers();
  for (const o of map.overlays) {
    if (o.type === "circle") {
      L.circle([o.center.lat, o.center.lng], { radius: o.radius, color: o.color, fillColor: o.fill_color, fillOpacity: o.fill_opacity })
        .bindPopup(o.label).addTo(layer);
    } else {
      const marker = L.marker([o.position.lat, o.position.lng]).addTo(layer);
      if (o.label) marker.bindPopup(o.label);
    }
  }
}

function render(snapshot) {
  const view = snapshot.view;
  if (view.screen === "landing") {
    renderLanding(view);
    screen = "landing";
    return;
  }
  if (screen !== "dashboard" || !leaflet) renderDashboardShell(view);
  screen = "dashboard";
  const banner = document.getElementById("banner");
  banner.replaceChildren(...(view.banner
    ? [el("div", { class: "alert" }, el("strong", {}, view.banner.type + ": "), view.banner.message)]
    : []));
  renderControls(view.controls);
  renderChart(view.chart);
  renderMap(view.map);
  document.getElementById("metrics").replaceChildren(...view.metrics.map(m =>
    el("div", { class: "metric" }, el("strong", {}, m.label), el("span", {}, m.value))));
}

const events = new EventSource("/api/stream");
events.addEventListener("snapshot", (event) => render(JSON.parse(event.data)));
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_driven_map_moves_are_not_echoed() {
        assert!(INDEX_HTML.contains("leaflet._syncing = true;"));
        assert!(INDEX_HTML.contains("map.view.zoom, { animate: false });"));
        assert!(INDEX_HTML.contains("if (leaflet._syncing) return;"));
    }
}
