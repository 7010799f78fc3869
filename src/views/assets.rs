//! Stylesheet and script served under `/assets`.

pub const PORTAL_CSS: &str = r#":root {
  --highlight: #1d4ed8;
  --highlight-dark: #1e3a8a;
  --highlight-blue: #bfdbfe;
  --background: #ffffff;
  --muted: #6b7280;
  --danger: #ef4444;
}
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; color: #111827; background: #f3f4f6; min-height: 100vh; display: flex; flex-direction: column; }
main { flex: 1; padding: 2rem 1rem; }
a { color: var(--highlight-dark); }
.navbar { display: flex; align-items: center; gap: 1.5rem; padding: 0.75rem 1.5rem; background: var(--highlight-dark); }
.navbar a, .navbar summary { color: #fff; text-decoration: none; }
.brand { font-weight: 700; font-size: 1.25rem; }
.nav-links { display: flex; gap: 1rem; flex: 1; }
.nav-actions { display: flex; gap: 1rem; align-items: center; }
.nav-mobile { display: none; }
.sign-out { background: linear-gradient(to right, #6366f1, #a855f7); color: #fff; border: 0; border-radius: 0.5rem; padding: 0.4rem 0.9rem; cursor: pointer; }
.footer { text-align: center; padding: 1rem; color: var(--muted); font-size: 0.875rem; }
.container { max-width: 64rem; margin: 0 auto; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 0.75rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); padding: 1.5rem; }
.narrow { max-width: 36rem; margin: 2rem auto; }
.center { text-align: center; }
.muted { color: var(--muted); }
.error { color: var(--danger); }
.stack { display: flex; flex-direction: column; gap: 0.75rem; }
.grid { display: grid; gap: 1.5rem; grid-template-columns: repeat(auto-fill, minmax(20rem, 1fr)); margin-bottom: 3rem; }
.page-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 2rem; gap: 1rem; }
.button { display: inline-block; background: var(--highlight); color: #fff; border: 0; border-radius: 0.375rem; padding: 0.5rem 1rem; font-weight: 600; text-decoration: none; cursor: pointer; }
.button:hover { background: var(--highlight-dark); }
.button:disabled { background: #9ca3af; cursor: not-allowed; opacity: 0.75; }
.button.muted { background: #d1d5db; color: #1f2937; }
.button.danger { background: var(--danger); }
.button.small { padding: 0.25rem 0.75rem; font-size: 0.875rem; }
.button.wide { width: 100%; }
.search { display: flex; gap: 0.5rem; margin-bottom: 1.5rem; }
.search input[type=text] { flex: 1; }
input, textarea, select { width: 100%; padding: 0.5rem 1rem; border: 1px solid #d1d5db; border-radius: 0.5rem; font: inherit; }
label { display: block; font-weight: 600; font-size: 0.875rem; margin: 1rem 0 0.25rem; }
.required { color: var(--danger); }
.hint { font-size: 0.8rem; color: var(--muted); margin: 0.25rem 0.5rem; }
.row { display: flex; gap: 1rem; }
.row > div { flex: 1; }
.event-date { white-space: pre-line; color: #4b5563; }
.meta { font-size: 0.875rem; color: var(--muted); margin: 0.25rem 0; }
.card-actions { display: flex; gap: 0.5rem; margin-top: 1rem; }
.pagination { display: flex; justify-content: center; align-items: center; gap: 1rem; }
.page-link { padding: 0.25rem 0.75rem; border: 1px solid #d1d5db; border-radius: 0.25rem; text-decoration: none; }
.page-link.disabled { opacity: 0.5; cursor: not-allowed; }
.confirm-dialog { border: 0; border-radius: 0.75rem; padding: 1.5rem; max-width: 28rem; }
.confirm-dialog::backdrop { background: rgba(0,0,0,0.4); }
.dialog-actions { display: flex; justify-content: flex-end; gap: 0.5rem; }
.toast { position: fixed; top: 2rem; left: 50%; transform: translateX(-50%); z-index: 50; width: 92vw; max-width: 28rem; display: flex; align-items: center; padding: 1rem 1.5rem; border-radius: 0.75rem; border: 1px solid; box-shadow: 0 10px 15px rgba(0,0,0,0.1); transition: opacity 0.3s, transform 0.3s; }
.toast-success { background: #dcfce7; border-color: #86efac; color: #166534; }
.toast-error { background: #fee2e2; border-color: #fca5a5; color: #991b1b; }
.toast-text { flex: 1; font-weight: 600; }
.toast-close { background: none; border: 0; font-size: 1.25rem; cursor: pointer; color: var(--muted); }
.toast-progress { position: absolute; left: 0; bottom: 0; height: 0.25rem; width: 100%; border-radius: 0 0 0.75rem 0.75rem; background: currentColor; }
.toast-hide { opacity: 0; transform: translate(-50%, -0.5rem); pointer-events: none; }
.resources { list-style: none; padding: 0; display: flex; flex-direction: column; gap: 1rem; }
.resource-link { display: block; padding: 1rem 1.5rem; border-radius: 0.5rem; background: var(--highlight); color: #fff; font-weight: 600; text-decoration: none; }
.resource-info summary { cursor: pointer; color: var(--muted); font-size: 0.875rem; margin: 0.25rem 1.5rem; }
.resource-info p { margin: 0.25rem 1.5rem; font-size: 0.875rem; }
.account-row, .contact-row { display: flex; justify-content: space-between; gap: 1rem; }
.label { font-weight: 600; color: #4b5563; }
.callout { margin-top: 2rem; padding: 1rem; background: #eff6ff; border-radius: 0.5rem; display: flex; flex-direction: column; gap: 0.5rem; }
.copy-button { background: none; border: 0; color: var(--highlight-dark); cursor: pointer; font: inherit; text-decoration: underline; padding: 0; }
.copy-done { font-size: 0.75rem; color: #15803d; margin-left: 0.5rem; }
@media (max-width: 768px) {
  .nav-links, .nav-actions { display: none; }
  .nav-mobile { display: block; margin-left: auto; }
  .nav-mobile[open] { display: flex; flex-direction: column; gap: 0.5rem; }
  .row, .page-header, .search { flex-direction: column; }
}
"#;

pub const PORTAL_JS: &str = r##"(function () {
  "use strict";

  function initToast() {
    var toast = document.querySelector("[data-toast]");
    if (!toast) return;

    var clean = toast.getAttribute("data-clean-url");
    if (clean) window.history.replaceState(window.history.state, "", clean);

    var total = parseInt(toast.getAttribute("data-dismiss-ms"), 10) || 5000;
    var remaining = total;
    var paused = false;
    var bar = toast.querySelector(".toast-progress");

    function close() {
      clearInterval(timer);
      toast.classList.add("toast-hide");
      setTimeout(function () { toast.remove(); }, 350);
    }

    var timer = setInterval(function () {
      if (paused) return;
      remaining -= 50;
      if (bar) bar.style.width = Math.max(0, (remaining / total) * 100) + "%";
      if (remaining <= 0) close();
    }, 50);

    toast.addEventListener("mouseenter", function () { paused = true; });
    toast.addEventListener("mouseleave", function () { paused = false; });
    var button = toast.querySelector("[data-toast-close]");
    if (button) button.addEventListener("click", close);
  }

  function initCopyButtons() {
    document.querySelectorAll("[data-copy]").forEach(function (button) {
      button.addEventListener("click", function () {
        var done = button.parentNode.querySelector(".copy-done");
        navigator.clipboard.writeText(button.getAttribute("data-copy")).then(function () {
          if (!done) return;
          done.hidden = false;
          setTimeout(function () { done.hidden = true; }, 2000);
        }, function (err) {
          console.error("Failed to copy:", err);
        });
      });
    });
  }

  function initDialogs() {
    document.querySelectorAll("[data-dialog-open]").forEach(function (button) {
      var dialog = document.getElementById(button.getAttribute("data-dialog-open"));
      if (!dialog) return;
      button.addEventListener("click", function () { dialog.showModal(); });
      dialog.addEventListener("click", function (event) {
        if (event.target === dialog) dialog.close();
      });
      dialog.querySelectorAll("[data-dialog-close]").forEach(function (cancel) {
        cancel.addEventListener("click", function () { dialog.close(); });
      });
    });
  }

  // "YYYY-MM-DDTHH:MM" one hour later, without going through the browser zone.
  function plusHour(value) {
    var m = /^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2})/.exec(value);
    if (!m) return "";
    var t = Date.UTC(+m[1], +m[2] - 1, +m[3], +m[4] + 1, +m[5]);
    return new Date(t).toISOString().slice(0, 16);
  }

  function pendingOnSubmit(form) {
    form.addEventListener("submit", function () {
      var submit = form.querySelector("button[type=submit][data-pending-text]");
      if (!submit) return;
      setTimeout(function () {
        submit.disabled = true;
        submit.textContent = submit.getAttribute("data-pending-text");
      }, 0);
    });
  }

  function initEventForm(form) {
    var mode = form.getAttribute("data-mode");
    var dirtyInput = form.querySelector("input[name=dirty]");
    var dirty = dirtyInput.value ? dirtyInput.value.split(",") : [];
    var select = form.querySelector("select[name=organizingGroups]");
    var start = form.querySelector("#start");
    var end = form.querySelector("#end");
    var hint = form.querySelector("[data-end-hint]");
    var warning = form.querySelector("[data-groups-warning]");
    var submit = form.querySelector("button[type=submit]");

    function markDirty(name) {
      if (mode !== "edit" || dirty.indexOf(name) >= 0) return;
      dirty.push(name);
      dirtyInput.value = dirty.join(",");
    }

    function refresh() {
      var none = select.selectedOptions.length === 0;
      warning.hidden = !none;
      if (mode === "edit") {
        submit.disabled = dirty.length === 0 || (dirty.indexOf("organizingGroups") >= 0 && none);
      } else {
        submit.disabled = none;
      }
    }

    ["title", "description", "location", "address"].forEach(function (name) {
      form.querySelector("#" + name).addEventListener("input", function () {
        markDirty(name);
        refresh();
      });
    });

    select.addEventListener("change", function () {
      markDirty("organizingGroups");
      refresh();
    });

    start.addEventListener("change", function () {
      markDirty("start");
      var minNow = start.getAttribute("data-min-now");
      if (minNow) start.min = minNow;
      var minEnd = plusHour(start.value);
      if (minEnd) {
        end.min = minEnd;
        hint.textContent = "End time cannot be before " + minEnd.replace("T", " ") + ".";
        if (!end.value || end.value < minEnd) {
          end.value = minEnd;
          markDirty("end");
        }
      }
      refresh();
    });

    end.addEventListener("change", function () {
      markDirty("end");
      refresh();
    });

    refresh();
  }

  document.addEventListener("DOMContentLoaded", function () {
    initToast();
    initCopyButtons();
    initDialogs();
    document.querySelectorAll("[data-event-form]").forEach(initEventForm);
    document.querySelectorAll("form").forEach(pendingOnSubmit);
  });
})();
"##;
